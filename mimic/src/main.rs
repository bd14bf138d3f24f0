use anyhow::Result;
use mimic::{ExpertCollectConfig, NullRecorder};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ExpertCollectConfig::default();
    let mut collector = config.build_collector()?;
    collector.run(&mut NullRecorder::new())?;

    Ok(())
}
