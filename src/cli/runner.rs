use tracing::info;

use geocroissant::core::config::GeneratorConfig;
use geocroissant::Generator;

use super::args::CliArgs;
use super::errors::AppError;

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    if !args.directory.exists() {
        return Err(AppError::DirectoryNotFound { path: args.directory }.into());
    }

    let mut config = match &args.config {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::ConfigNotFound { path: path.clone() }.into());
            }
            GeneratorConfig::from_file(path)
                .map_err(|e| AppError::Generator(e.into()))?
        }
        None => GeneratorConfig::default(),
    };

    if args.no_stats {
        config.extraction.compute_statistics = false;
    }
    if args.no_cache {
        config.output.save_metadata_cache = false;
    }

    let output = args
        .output
        .unwrap_or_else(|| args.directory.join("geocroissant.json"));

    let generator = Generator::new(config);
    let result = generator
        .generate_to_path(&args.directory, &output)
        .map_err(AppError::Generator)?;

    let document = &result.document;
    info!(
        "Generated GeoCroissant metadata with {} distribution items and {} record sets",
        document["distribution"].as_array().map(|a| a.len()).unwrap_or(0),
        document["recordSet"].as_array().map(|a| a.len()).unwrap_or(0),
    );
    if let Some(keywords) = document["keywords"].as_array() {
        let joined: Vec<&str> = keywords.iter().filter_map(|k| k.as_str()).collect();
        info!("Keywords: {}", joined.join(", "));
    }
    if let Some(coverage) = document["temporalCoverage"].as_str() {
        info!("Temporal coverage: {}", coverage);
    }
    if result.files_failed > 0 {
        info!(
            "Extraction finished with {} of {} files skipped",
            result.files_failed,
            result.files_failed + result.files_extracted
        );
    }

    Ok(())
}
