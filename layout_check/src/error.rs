use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Cannot access `{path}`: {source}")]
    IOError {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("Cannot parse layout manifest: {source}")]
    ParseManifest {
        #[source]
        source: toml::de::Error,
    },
    #[error("Cannot write layout manifest: {source}")]
    WriteManifest {
        #[source]
        source: toml::ser::Error,
    },
    #[error("Reference has no image named `{name}`")]
    MissingImage { name: String },
    #[error("Reference image `{name}` is truncated. Expect ({expect}) bytes. Have ({have})")]
    TruncatedImage {
        name: String,
        expect: usize,
        have: usize,
    },
}
