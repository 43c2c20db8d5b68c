use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Raw,
}

impl From<elms_config::OutputFormat> for OutputFormat {
    fn from(format: elms_config::OutputFormat) -> Self {
        match format {
            elms_config::OutputFormat::Text => Self::Text,
            elms_config::OutputFormat::Json => Self::Json,
            elms_config::OutputFormat::Raw => Self::Raw,
        }
    }
}

/// Global flags resolved against configuration.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
}
