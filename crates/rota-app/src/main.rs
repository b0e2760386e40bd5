use chrono::Utc;
use rota_app::config::{ViewContext, load_config};
use rota_app::render::render_roster;
use rota_app::view::RosterView;
use rota_client::ApiClient;
use rota_client::poll::Poller;
use rota_grid::layout::GridMetrics;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let ctx = ViewContext::resolve(config, Utc::now())?;
    let client = ApiClient::new(&ctx.settings.api)?;
    let view = RosterView::new(client, &ctx);
    let metrics = GridMetrics::default();

    tracing::info!(
        backend = %ctx.settings.api.base_url,
        timezone = %ctx.timezone,
        week_of = %ctx.reference,
        "Loading roster"
    );

    if !ctx.settings.polling.enabled {
        match view.fetch().await {
            Ok(snapshot) => {
                println!("{}", render_roster(&snapshot, ctx.timezone, ctx.today, &metrics));
                return Ok(());
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load roster");
                anyhow::bail!(e.user_message());
            }
        }
    }

    let interval = ctx.settings.polling.interval();
    tracing::info!(interval_secs = interval.as_secs(), "Auto-refresh enabled");

    let poller = Poller::spawn("roster", interval, {
        let view = view.clone();
        move || {
            let view = view.clone();
            async move { view.refresh().await }
        }
    });
    let mut updates = poller.subscribe();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let latest = updates.borrow_and_update().clone();
                if let Some(Some(snapshot)) = latest {
                    println!("{}", render_roster(&snapshot, ctx.timezone, ctx.today, &metrics));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping auto-refresh");
                break;
            }
        }
    }

    poller.stop();
    Ok(())
}
