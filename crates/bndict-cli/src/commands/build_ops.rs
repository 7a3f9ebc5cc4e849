use std::env;
use std::path::{Path, PathBuf};
use std::process;

use bndict_core::export::{self, ExportSummary};
use bndict_core::settings::Settings;

use crate::pipeline;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn build(config: Option<&str>, data_dir: Option<&str>, output: Option<&str>) {
    let settings = die!(
        Settings::load(config.map(Path::new)),
        "Error loading settings: {}"
    );

    let data_dir = match data_dir {
        Some(dir) => PathBuf::from(dir),
        None => pipeline::default_data_dir(env::current_exe().ok().as_deref()),
    };
    let data_dir = data_dir.as_path();
    if !data_dir.is_dir() {
        eprintln!("Error: {} is not a directory", data_dir.display());
        process::exit(1);
    }

    let output_dir = pipeline::resolve_output_dir(&settings, data_dir, output.map(Path::new));
    let summary = die!(
        pipeline::build(&settings, data_dir, &output_dir),
        "Error: {}"
    );
    report(&summary, &output_dir);
}

pub fn split(dump_file: &str, output_dir: &str) {
    let dict = die!(
        export::load_dump(Path::new(dump_file)),
        "Error loading {dump_file}: {}"
    );
    let output_dir = Path::new(output_dir);
    let summary = die!(
        export::export(&dict, output_dir),
        "Error writing {}: {}",
        output_dir.display()
    );
    report(&summary, output_dir);
}

fn report(summary: &ExportSummary, output_dir: &Path) {
    println!("Total words: {}", summary.words);
    for (group, count) in &summary.groups {
        println!("{group}: {count}");
    }
    println!("Wrote {} files to {}", summary.groups.len() + 2, output_dir.display());
}
