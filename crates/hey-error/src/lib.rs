use std::fmt;

#[derive(Debug)]
pub enum HeyError {
    InvalidArgument(String),
    RegistryUnavailable { url: String, reason: String },
    MissingLatestTag(String),
    UnknownDistTag { name: String, tag: String },
    MissingVersionData(String),
    InstallError { package: String, reason: String },
    ManifestError(String),
    Io(String),
}

impl HeyError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn registry_unavailable(url: &str, reason: impl fmt::Display) -> Self {
        Self::RegistryUnavailable {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn install(package: &str, reason: impl fmt::Display) -> Self {
        Self::InstallError {
            package: package.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for HeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => {
                write!(f, "Invalid argument: {msg}")
            }
            Self::RegistryUnavailable { url, reason } => {
                write!(f, "Registry unavailable at {url}: {reason}")
            }
            Self::MissingLatestTag(name) => {
                write!(f, "Registry entry for '{name}' has no latest version tag")
            }
            Self::UnknownDistTag { name, tag } => {
                write!(f, "Registry entry for '{name}' has no '{tag}' tag")
            }
            Self::MissingVersionData(name) => {
                write!(f, "Registry entry for '{name}' has no version data")
            }
            Self::InstallError { package, reason } => {
                write!(f, "Failed to install {package}: {reason}")
            }
            Self::ManifestError(msg) => {
                write!(f, "Package.json error: {msg}")
            }
            Self::Io(msg) => {
                write!(f, "IO error: {msg}")
            }
        }
    }
}

impl std::error::Error for HeyError {}

impl From<std::io::Error> for HeyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HeyError>;
