use serde::{Deserialize, Serialize};

/// Respuesta de `POST /deliveries/:id/evidence`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Archivo local a subir como evidencia
#[derive(Debug, Clone)]
pub struct EvidenceFile {
    pub path: std::path::PathBuf,
    pub name: String,
    pub mime_type: String,
}

impl EvidenceFile {
    /// Deduce nombre y tipo MIME a partir de la ruta
    pub fn from_path(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "evidence".to_string());
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let mime_type = match extension.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "pdf" => "application/pdf",
            _ => "application/octet-stream",
        }
        .to_string();
        Self {
            path,
            name,
            mime_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_file_from_path() {
        let file = EvidenceFile::from_path("/tmp/fotos/comprovante.JPG");
        assert_eq!(file.name, "comprovante.JPG");
        assert_eq!(file.mime_type, "image/jpeg");

        let unknown = EvidenceFile::from_path("/tmp/assinatura");
        assert_eq!(unknown.mime_type, "application/octet-stream");
    }
}
