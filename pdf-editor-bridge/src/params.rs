use std::convert::Infallible;

use clap::Parser;
use upload_coordinator::config::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_SINGLE_REQUEST_SIZE};
use upload_coordinator::network::http_backend::DEFAULT_READ_RETRIES;
use upload_coordinator::{DebugLevel, UploadLimits};
use validator::Validate;

#[derive(Parser, Validate, Debug)]
pub struct Args {
    /// Address the editor page talks to.
    #[clap(long, env = "BRIDGE_HTTP_ADDR", default_value = "127.0.0.1:8080")]
    pub(crate) http_addr: String,

    /// Base URL of the document backend.
    #[clap(long, env = "BRIDGE_BACKEND_URL")]
    #[validate(url)]
    pub(crate) backend_url: String,

    #[clap(long, env = "BRIDGE_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    #[validate(range(min = 1))]
    pub(crate) chunk_size: usize,

    #[clap(long, env = "BRIDGE_MAX_SINGLE_REQUEST_SIZE", default_value_t = DEFAULT_MAX_SINGLE_REQUEST_SIZE)]
    #[validate(range(min = 1))]
    pub(crate) max_single_request_size: usize,

    /// 0 - no logs, 1 - errors only, 2 - info & warnings, 3 - everything.
    #[clap(long, env = "BRIDGE_DEBUG_LEVEL", default_value = "3", value_parser = parse_debug_level)]
    pub(crate) debug_level: DebugLevel,

    #[clap(long, env = "BRIDGE_READ_RETRIES", default_value_t = DEFAULT_READ_RETRIES)]
    pub(crate) read_retries: usize,

    /// Editor messages that may wait behind a running save.
    #[clap(long, default_value_t = 16)]
    #[validate(range(min = 1))]
    pub(crate) save_queue: usize,

    /// Largest request body accepted from the editor, in bytes.
    #[clap(long, default_value_t = 64 * 1024 * 1024)]
    #[validate(range(min = 1))]
    pub(crate) max_payload_bytes: usize,
}

impl Args {
    pub(crate) fn upload_limits(&self) -> Option<UploadLimits> {
        UploadLimits::new(self.chunk_size, self.max_single_request_size)
    }
}

fn parse_debug_level(value: &str) -> Result<DebugLevel, Infallible> {
    Ok(DebugLevel::from_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["pdf-editor-bridge", "--backend-url", "http://backend:9000/api"]).unwrap();

        assert!(args.validate().is_ok());
        assert_eq!(args.upload_limits(), Some(UploadLimits::default()));
        assert_eq!(args.debug_level, DebugLevel::All);
    }

    #[test]
    fn test_invalid_debug_level_resets_to_off() {
        let args = Args::try_parse_from([
            "pdf-editor-bridge",
            "--backend-url",
            "http://backend:9000",
            "--debug-level",
            "9",
        ])
        .unwrap();
        assert_eq!(args.debug_level, DebugLevel::Off);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let args = Args::try_parse_from([
            "pdf-editor-bridge",
            "--backend-url",
            "not-a-url",
            "--chunk-size",
            "0",
        ])
        .unwrap();

        let errors = args.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("backend_url"));
        assert!(fields.contains_key("chunk_size"));
    }
}
