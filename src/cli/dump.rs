use anyhow::Result;
use indicatif::MultiProgress;

use adts::process::decode::{Driver, DriverOptions};
use adts::process::engine::DecodeEngine;
use adts::process::source::ByteSource;

use crate::cli::command::Cli;
use crate::cli::progress::create_progress_bar;
use crate::timestamp::time_str;

#[cfg(feature = "symphonia-backend")]
pub fn cmd_dump(cli: &Cli, multi: Option<&MultiProgress>) -> Result<()> {
    use adts::process::symphonia::SymphoniaEngine;

    let engine = SymphoniaEngine::new(cli.sample_format.into());
    dump_with(engine, cli, multi)
}

#[cfg(not(feature = "symphonia-backend"))]
pub fn cmd_dump(_cli: &Cli, _multi: Option<&MultiProgress>) -> Result<()> {
    anyhow::bail!("built without a decode engine; enable the `symphonia-backend` feature")
}

pub fn dump_with<E: DecodeEngine>(
    engine: E,
    cli: &Cli,
    multi: Option<&MultiProgress>,
) -> Result<()> {
    let source = ByteSource::open(&cli.input)?;

    let options = DriverOptions {
        max_frames: DriverOptions::frame_limit(cli.max_frames),
        fail_level: if cli.strict {
            log::Level::Warn
        } else {
            log::Level::Error
        },
    };

    let mut driver = Driver::new(source, engine, &cli.output_dir, options)?;
    log::debug!("Writing artifacts to {}", driver.output_dir().display());

    let pb = multi
        .map(|multi| create_progress_bar(multi, driver.stream_len() as u64))
        .transpose()?;
    let sample_rate = driver.config().sample_rate;

    loop {
        match driver.step() {
            Ok(Some(_)) => {
                if let Some(pb) = &pb {
                    pb.set_position(driver.cursor() as u64);
                    pb.set_message(format!(
                        "frame {} | timestamp: {}",
                        driver.frame_index(),
                        time_str(driver.summary().total_samples, sample_rate)
                    ));
                }
            }
            Ok(None) => break,
            Err(e) => {
                if let Some(pb) = &pb {
                    pb.abandon_with_message("dump failed");
                }
                return Err(e);
            }
        }
    }

    let summary = driver.finish()?;

    if let Some(pb) = &pb {
        pb.finish_with_message(format!(
            "{} frames | timestamp: {}",
            summary.total_frames,
            time_str(summary.total_samples, summary.sample_rate)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adts::process::EXAMPLE_DATA;
    use adts::process::engine::{
        DecodeFailure, DecodedFrame, EngineError, PcmBuffer, SampleFormat, StreamConfig,
    };
    use clap::Parser as ClapParser;
    use std::fs;

    /// Mono engine producing a constant 4-sample frame.
    struct ConstantEngine;

    impl DecodeEngine for ConstantEngine {
        fn sample_format(&self) -> SampleFormat {
            SampleFormat::Int16
        }

        fn init(&mut self, _data: &[u8]) -> Result<StreamConfig, EngineError> {
            Ok(StreamConfig {
                sample_rate: 8000,
                channels: 1,
            })
        }

        fn decode(&mut self, _frame: &[u8]) -> Result<DecodedFrame, DecodeFailure> {
            Ok(DecodedFrame {
                samples: PcmBuffer::Int16(vec![7; 4]),
                channels: 1,
            })
        }

        fn close(&mut self) {}
    }

    #[test]
    fn dumps_example_stream() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("in.aac");
        let output = dir.path().join("out");
        fs::write(&input, EXAMPLE_DATA)?;

        let cli = Cli::try_parse_from([
            "adtsdump".as_ref(),
            input.as_os_str(),
            output.as_os_str(),
        ])?;
        dump_with(ConstantEngine, &cli, None)?;

        assert_eq!(fs::read(output.join("frame_0001_pcm.bin"))?, [7, 0, 7, 0, 7, 0, 7, 0]);
        assert_eq!(
            fs::read_to_string(output.join("info.json"))?,
            "{\n  \"sample_rate\": 8000,\n  \"channels\": 1,\n  \"total_frames\": 2,\n  \"total_samples\": 8,\n  \"format\": \"int16\"\n}\n"
        );
        Ok(())
    }

    #[test]
    fn missing_input_fails_without_output() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("out");

        let cli = Cli::try_parse_from([
            "adtsdump".as_ref(),
            dir.path().join("missing.aac").as_os_str(),
            output.as_os_str(),
        ])?;

        assert!(dump_with(ConstantEngine, &cli, None).is_err());
        assert!(!output.exists());
        Ok(())
    }
}
