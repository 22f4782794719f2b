/// Command-line front end for the catalog.
///
/// `solmon-catalog [verify|modules|tags <MODULE>|export [PATH]]`
///
/// With no command, runs `verify`. Exit status is 0 for a clean catalog,
/// 1 for a failed (or, under `strict`, degraded) verification, 2 for
/// usage and configuration errors.

use std::process::ExitCode;

use solmon_catalog::catalog::Catalog;
use solmon_catalog::config::CatalogConfig;
use solmon_catalog::logging::{self, Component};
use solmon_catalog::model::CatalogError;
use solmon_catalog::modules;
use solmon_catalog::verify::{self, VerificationStatus};

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match CatalogConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("solmon-catalog: {}", e);
            return ExitCode::from(2);
        }
    };
    let min_level = match config.min_log_level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("solmon-catalog: {}", e);
            return ExitCode::from(2);
        }
    };
    logging::init_logger(min_level, config.log_file.as_deref());

    let command = args.first().map(String::as_str).unwrap_or("verify");
    match command {
        "verify" => cmd_verify(&config),
        "modules" => cmd_modules(&config),
        "tags" => cmd_tags(&config, args.get(1).map(String::as_str)),
        "export" => cmd_export(&config, args.get(1).map(String::as_str)),
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        other => {
            eprintln!("solmon-catalog: unknown command '{}'", other);
            print_usage();
            ExitCode::from(2)
        }
    }
}

fn print_usage() {
    println!("Usage: solmon-catalog [COMMAND]");
    println!();
    println!("Commands:");
    println!("  verify           Check the catalog's shape (default)");
    println!("  modules          List dashboard modules and their tag counts");
    println!("  tags <MODULE>    List the tags of one module");
    println!("  export [PATH]    Write the UI payload JSON to PATH or stdout");
    println!();
    println!("Configuration: solmon.toml in the working directory, overridden");
    println!("by SOLMON_CATALOG, SOLMON_LOG, SOLMON_LOG_FILE, SOLMON_STRICT.");
}

/// Loads the configured catalog file, or the embedded payload when no
/// path is configured.
fn load_catalog(config: &CatalogConfig) -> Result<Catalog, CatalogError> {
    match &config.catalog_path {
        Some(path) => {
            logging::info(
                Component::Catalog,
                None,
                &format!("loading catalog from {}", path.display()),
            );
            Catalog::from_path(path)
        }
        None => Catalog::embedded(),
    }
}

fn cmd_verify(config: &CatalogConfig) -> ExitCode {
    let catalog = match load_catalog(config) {
        Ok(catalog) => catalog,
        Err(e) => {
            logging::error(Component::Catalog, None, &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let report = verify::run_verification(&catalog);
    verify::print_report(&report);
    verify::print_summary(&report);

    match report.summary.overall {
        VerificationStatus::Success => ExitCode::SUCCESS,
        VerificationStatus::PartialSuccess if !config.strict => ExitCode::SUCCESS,
        VerificationStatus::PartialSuccess => {
            logging::warn(
                Component::Verify,
                None,
                "degraded catalog rejected by strict mode",
            );
            ExitCode::FAILURE
        }
        VerificationStatus::Failed => ExitCode::FAILURE,
    }
}

fn cmd_modules(config: &CatalogConfig) -> ExitCode {
    let catalog = match load_catalog(config) {
        Ok(catalog) => catalog,
        Err(e) => {
            logging::error(Component::Catalog, None, &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let facility = catalog.facility();
    println!("{} — {}", facility.name, facility.description);
    match facility.max_date {
        Some(max) => println!("Data range: {} to {}", facility.min_date, max),
        None => println!("Data range: {} onward", facility.min_date),
    }
    println!();
    for group in catalog.groups() {
        let label = catalog
            .modules()
            .iter()
            .find(|m| m.id == group.module_id)
            .map(|m| m.label.as_str())
            .unwrap_or("");
        let registered = if modules::find_module(&group.module_id).is_some() {
            ""
        } else {
            "  (not in registry)"
        };
        println!(
            "  {:<12} {:<12} {:>4} tags{}",
            group.module_id,
            label,
            group.tags.len(),
            registered
        );
    }
    ExitCode::SUCCESS
}

fn cmd_tags(config: &CatalogConfig, module_id: Option<&str>) -> ExitCode {
    let Some(module_id) = module_id else {
        eprintln!("solmon-catalog: 'tags' needs a module code");
        eprintln!("Known modules: {}", modules::all_module_ids().join(", "));
        return ExitCode::from(2);
    };

    let catalog = match load_catalog(config) {
        Ok(catalog) => catalog,
        Err(e) => {
            logging::error(Component::Catalog, None, &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match catalog.tags_for_module(module_id) {
        Some(tags) => {
            for tag in tags {
                println!("{:<24} {}", tag.id, tag.short_description());
            }
            logging::debug(
                Component::Cli,
                Some(module_id),
                &format!("listed {} tags", tags.len()),
            );
            ExitCode::SUCCESS
        }
        None => {
            let err = CatalogError::UnknownModule(module_id.to_string());
            eprintln!("solmon-catalog: {}", err);
            eprintln!("Known modules: {}", modules::all_module_ids().join(", "));
            ExitCode::from(2)
        }
    }
}

fn cmd_export(config: &CatalogConfig, path: Option<&str>) -> ExitCode {
    let catalog = match load_catalog(config) {
        Ok(catalog) => catalog,
        Err(e) => {
            logging::error(Component::Catalog, None, &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let json = match catalog.to_ui_json() {
        Ok(json) => json,
        Err(e) => {
            logging::error(Component::Catalog, None, &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match path {
        Some(path) => {
            if let Err(e) = std::fs::write(path, json + "\n") {
                logging::error(Component::Cli, None, &format!("writing {}: {}", path, e));
                return ExitCode::FAILURE;
            }
            logging::info(Component::Cli, None, &format!("payload written to {}", path));
        }
        None => println!("{}", json),
    }
    ExitCode::SUCCESS
}
