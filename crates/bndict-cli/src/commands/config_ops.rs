use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", bndict_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        bndict_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: {} sources, output.dir={}",
        s.sources.len(),
        s.output.dir.display()
    );
    for (i, source) in s.sources.iter().enumerate() {
        println!("  [{i}] {} ({})", source.path.display(), source.format);
    }
}
