/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use clap::Parser;
use log::error;
use std::path::PathBuf;

use fmi_saa::{load_config, weather};

/// Latest weather observations for a place in Finland
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Place to search observations for, e.g. "Helsinki" or "Kumpula"
    place: Option<String>,

    /// Path to YAML configuration [default: config.yml]
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            error!("Could not get configuration. Exiting.");
            std::process::exit(2);
        }
    };

    let place = args.place.unwrap_or_else(|| config.place.to_owned());

    match weather(&place, &config).await {
        Ok(msg) => println!("{}", msg),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
