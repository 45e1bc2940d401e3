use anyhow::Context;
use cardapio::core::{Config, setup_environment};
use cardapio::tui::{self, App};
use cardapio::utils::init_logger;
use cardapio::OrderLedger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_environment();
    let config = Config::from_env();

    init_logger(&config.log_level, config.log_dir.as_deref());
    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        "Cardapio starting"
    );

    let menu = config
        .load_menu()
        .with_context(|| format!("loading menu from {:?}", config.menu_file))?;
    let sink = config
        .export_sink()
        .context("invalid SHARE_COMMAND or EXPORT_FILE_NAME")?;
    tracing::info!(
        export_dir = %sink.dir().display(),
        file = %config.export_file_name,
        share = config.share_command.is_some(),
        "Export configured"
    );
    let ledger = OrderLedger::new(menu).with_export_file_name(config.export_file_name.clone());

    let mut app = App::new(ledger, sink);
    tui::run(&mut app)?;

    tracing::info!(
        saved = app.ledger().history().len(),
        "Cardapio stopped"
    );
    Ok(())
}
