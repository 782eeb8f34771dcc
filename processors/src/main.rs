use processors::{settings::Settings, startup::App};
use snafu::Report;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let settings = match Settings::new() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", Report::from_error(e));
            std::process::exit(1);
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::from(settings.log_level))
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {e}");
    }

    info!("starting voyage processors in '{:?}'", settings.environment);

    let result = match App::build(&settings) {
        Ok(app) => app.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("{}", Report::from_error(e));
        std::process::exit(1);
    }
}
