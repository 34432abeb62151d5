use conjunction_screen::catalog::load_catalogue;
use conjunction_screen::config::Config;
use conjunction_screen::pipeline::run;

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    if let Some(workers) = config.workers {
        if let Err(err) = rayon::ThreadPoolBuilder::new().num_threads(workers).build_global() {
            tracing::warn!("failed to apply WORKERS override: {}", err);
        }
    }

    let satellites = match load_catalogue(&config.catalogue_path) {
        Ok(satellites) => satellites,
        Err(err) => {
            tracing::error!("failed to load catalogue: {}", err);
            return std::process::ExitCode::FAILURE;
        }
    };

    let conjunctions = run(&satellites, &config);
    tracing::info!("emitting {} conjunctions", conjunctions.len());

    for c in &conjunctions {
        println!(
            "{} {} {:.6} {:.4}",
            c.object_id_a, c.object_id_b, c.julian_date, c.distance_km
        );
    }

    std::process::ExitCode::SUCCESS
}
