use clap::Parser;
use log::{debug, LevelFilter};
use poll_results::Step;
use snafu::ErrorCompat;

mod args;
mod results;

use crate::args::Args;
use crate::results::{render_page, PageRequest};

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    debug!("args: {:?}", args);

    let request = PageRequest {
        config_path: args.config.clone(),
        dataset: args.dataset.clone(),
        question: args.question,
        step: match args.step.as_deref() {
            Some("previous") => Some(Step::Previous),
            Some("next") => Some(Step::Next),
            _ => None,
        },
        statistics: args.stats,
    };

    if let Err(e) = render_page(&request, args.out.clone(), args.reference.clone()) {
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
