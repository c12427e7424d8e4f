use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Thumbnail store backend types
///
/// Defined in core because configuration selects the backend and the API
/// reports it in readiness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailBackend {
    /// Files under the assets root, served by the static asset route.
    Local,
    /// Process-wide in-memory map, served by the thumbnail retrieval route.
    Memory,
}

impl FromStr for ThumbnailBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "disk" | "filesystem" => Ok(ThumbnailBackend::Local),
            "memory" => Ok(ThumbnailBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid thumbnail store backend: {}", s)),
        }
    }
}

impl Display for ThumbnailBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ThumbnailBackend::Local => write!(f, "local"),
            ThumbnailBackend::Memory => write!(f, "memory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_backends() {
        assert_eq!("local".parse::<ThumbnailBackend>().unwrap(), ThumbnailBackend::Local);
        assert_eq!("Disk".parse::<ThumbnailBackend>().unwrap(), ThumbnailBackend::Local);
        assert_eq!(" memory ".parse::<ThumbnailBackend>().unwrap(), ThumbnailBackend::Memory);
        assert!("s3".parse::<ThumbnailBackend>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for backend in [ThumbnailBackend::Local, ThumbnailBackend::Memory] {
            assert_eq!(backend.to_string().parse::<ThumbnailBackend>().unwrap(), backend);
        }
    }
}
