/// Logs a recoverable condition, or returns it as an error when its level is
/// at or above the configured `fail_level` of `$state`.
#[macro_export]
macro_rules! log_or_err {
    ($state:expr, $level:expr, $err:expr $(,)?) => {{
        if $level <= $state.fail_level {
            return Err($err);
        } else {
            match $level {
                ::log::Level::Error => ::log::error!("{}", $err),
                ::log::Level::Warn => ::log::warn!("{}", $err),
                ::log::Level::Info => ::log::info!("{}", $err),
                ::log::Level::Debug => ::log::debug!("{}", $err),
                ::log::Level::Trace => ::log::trace!("{}", $err),
            }
        }
    }};
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("ADTS header needs {needed} bytes, only {available} remain")]
    Truncated { needed: usize, available: usize },

    #[error("Invalid ADTS syncword. Read {0:#06X}")]
    BadSyncWord(u16),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame_length {0} is shorter than the ADTS header")]
    TooShort(u16),

    #[error("frame at offset {offset} declares {frame_length} bytes, stream ends at {stream_len}")]
    Overrun {
        offset: usize,
        frame_length: u16,
        stream_len: usize,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("not an ADTS stream (no sync word found in {0} bytes)")]
    NoSyncWord(usize),

    #[error("decoder init failed: {0}")]
    EngineInit(String),

    #[error("invalid ADTS header at frame {frame}: {source}")]
    InvalidHeader { frame: u64, source: HeaderError },

    #[error("invalid frame length at frame {frame}: {source}")]
    InvalidFrame { frame: u64, source: FrameError },

    #[error("decode error at frame {frame}: {message} (code {code})")]
    Decode { frame: u64, code: u32, message: String },

    #[error("frame {frame} reports {samples} samples with no channels")]
    NoChannels { frame: u64, samples: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ArtifactError {
    #[error("header artifact must be {expected} bytes, got {actual}")]
    WrongSize { expected: usize, actual: usize },

    #[error("header artifact has syncword {0:#06X}, expected 0x0FFF")]
    BadSyncWord(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct State {
        fail_level: log::Level,
    }

    fn report(state: &State, level: log::Level) -> Result<(), FrameError> {
        log_or_err!(state, level, FrameError::TooShort(3));
        Ok(())
    }

    #[test]
    fn warnings_only_fail_in_strict_mode() {
        let lenient = State {
            fail_level: log::Level::Error,
        };
        let strict = State {
            fail_level: log::Level::Warn,
        };

        assert!(report(&lenient, log::Level::Warn).is_ok());
        assert_eq!(
            report(&strict, log::Level::Warn),
            Err(FrameError::TooShort(3))
        );
        assert!(report(&lenient, log::Level::Error).is_err());
    }
}
