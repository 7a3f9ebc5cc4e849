use std::path::Path;
use std::process;

use bndict_core::dict::normalize;
use bndict_core::export;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn lookup(dump_file: &str, word: &str) {
    let dict = die!(
        export::load_dump(Path::new(dump_file)),
        "Error loading {dump_file}: {}"
    );

    let entry = dict
        .get(word)
        .or_else(|| normalize::clean_en(word).and_then(|key| dict.get(&key)));
    let Some(entry) = entry else {
        println!("{word}: not found");
        return;
    };

    println!("{} → {}", entry.en(), entry.bn());
    if !entry.synonyms_bn().is_empty() {
        println!("  bn synonyms: {}", entry.synonyms_bn().join(", "));
    }
    if !entry.synonyms_en().is_empty() {
        println!("  en synonyms: {}", entry.synonyms_en().join(", "));
    }
}

pub fn info(dir: &str) {
    let summary = die!(
        export::read_summary(Path::new(dir)),
        "Error reading export in {dir}: {}"
    );

    println!("Export:  {dir}");
    println!("Words:   {}", summary.words);
    println!("Groups:  {}", summary.groups.len());
    let grouped: usize = summary.groups.iter().map(|(_, n)| n).sum();
    if grouped != summary.words {
        println!("Warning: group files hold {grouped} entries");
    }
    for (group, count) in &summary.groups {
        println!("  {:<8} {count:>8}", group.to_string());
    }
}
