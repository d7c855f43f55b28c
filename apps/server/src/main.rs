use anyhow::Context;
use campus::kernel::config::load_config;
use campus::kernel::domain::config::ApiConfig;
use campus_logger::Logger;
use campus_server::Server;

#[campus_runtime::main(server)]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;


    let _log = Logger::builder(env!("CARGO_PKG_NAME"))
        .level_name(&cfg.logging.level)
        .directory(cfg.logging.dir.clone())
        .json(cfg.logging.json)
        .max_files(cfg.logging.max_files)
        .init()?;

    Server::builder().config(cfg).build().await?.run().await
}
