use crate::config::ConfigError;

const PDF_SUFFIX: &str = ".pdf";
const PNG_SUFFIX: &str = ".png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    AWS,
    GCS,
}

pub fn parse_provider_from_uri(bucket_uri: &str) -> Result<Provider, ConfigError> {
    if bucket_uri.starts_with("s3://") {
        Ok(Provider::AWS)
    } else if bucket_uri.starts_with("gs://") {
        Ok(Provider::GCS)
    } else {
        Err(ConfigError::Invalid {
            key: "STORAGE_BUCKET".to_string(),
            message: format!("failed to parse provider of: {}", bucket_uri),
        })
    }
}

pub fn parse_bucket_from_uri(bucket_uri: &str) -> &str {
    bucket_uri
        .split_once("://")
        .map(|(_, rest)| rest.trim_end_matches('/'))
        .unwrap_or("")
}

/// Folder prefix as used in list requests, always ending in `/`.
pub fn folder_prefix(folder: &str) -> String {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        return String::new();
    }

    format!("{}/", folder)
}

/// Final path segment of `key` when it is a direct child of `prefix`.
pub fn child_name<'a>(prefix: &str, key: &'a str) -> Option<&'a str> {
    let rest = key.strip_prefix(prefix)?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }

    Some(rest)
}

pub fn thumbnail_name(name: &str) -> String {
    let stem = name.strip_suffix(PDF_SUFFIX).unwrap_or(name);
    format!("{}{}", stem, PNG_SUFFIX)
}

pub fn object_key(folder: &str, name: &str) -> String {
    format!("{}{}", folder_prefix(folder), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider() {
        assert!(matches!(parse_provider_from_uri("s3://bucket"), Ok(Provider::AWS)));
        assert!(matches!(parse_provider_from_uri("gs://bucket"), Ok(Provider::GCS)));
        assert!(matches!(parse_provider_from_uri("ftp://bucket"), Err(_)));
    }

    #[test]
    fn test_parse_bucket() {
        let cases = vec![
            ("s3://bucket", "bucket"),
            ("gs://mtvgeismar-3bf45.firebasestorage.app/", "mtvgeismar-3bf45.firebasestorage.app"),
            ("bucket", ""),
        ];

        for (uri, expected) in cases {
            assert_eq!(parse_bucket_from_uri(uri), expected, "failed case: {}", uri);
        }
    }

    #[test]
    fn test_child_name() {
        let cases = vec![
            ("rundschau/", "rundschau/1986-04.pdf", Some("1986-04.pdf")),
            ("rundschau/", "rundschau/", None),
            ("rundschau/", "rundschau/old/1970-01.pdf", None),
            ("rundschau/", "rundschauPreview/1986-04.png", None),
            ("", "1986-04.pdf", Some("1986-04.pdf")),
        ];

        for (prefix, key, expected) in cases {
            assert_eq!(child_name(prefix, key), expected, "failed case: {}", key);
        }
    }

    #[test]
    fn test_thumbnail_name() {
        let cases = vec![
            ("1986-04.pdf", "1986-04.png"),
            ("a.pdf.pdf", "a.pdf.png"),
            ("notes", "notes.png"),
            ("UPPER.PDF", "UPPER.PDF.png"),
        ];

        for (name, expected) in cases {
            assert_eq!(thumbnail_name(name), expected, "failed case: {}", name);
        }
    }

    #[test]
    fn test_object_key() {
        assert_eq!(object_key("rundschauPreview", "1986-04.png"), "rundschauPreview/1986-04.png");
        assert_eq!(object_key("/rundschau/", "x.pdf"), "rundschau/x.pdf");
        assert_eq!(object_key("", "x.pdf"), "x.pdf");
    }
}
