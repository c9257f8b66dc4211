use crate::dataset;
use clap::{ArgAction, Parser};
use lazy_static::lazy_static;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn get_default_thread_no() -> usize {
    num_cpus::get()
}

lazy_static! {
    pub static ref BUILD_INFO: String = format!(
        "  ver: {}  rev: {}",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_GIT_HASH")
    );
}

#[derive(Parser, Debug)]
#[command(version = BUILD_INFO.as_str(), rename_all = "kebab-case")]
/// Generate a dataset of random short strings and compare equivalent
/// empty-string counting strategies: hand-written loops, iterator
/// filter-count, and a rayon parallel count.
///
/// Timings are reported for information only. The run fails when two
/// strategies under comparison disagree on the count.
pub struct CliCfg {
    #[arg(short='z', long="size", value_parser=parse_human_count, default_value_t = dataset::DEFAULT_SIZE)]
    /// number of dataset elements to generate per scenario, K/M suffixes accepted
    pub size: usize,
    #[arg(short = 'm', long = "max_len", default_value_t = dataset::DEFAULT_MAX_LEN)]
    /// exclusive upper bound on the random byte length of one element
    pub max_len: usize,
    #[arg(short = 'S', long = "seed")]
    /// fix the RNG seed for reproducible datasets
    pub seed: Option<u64>,
    #[arg(short = 'T', long = "trials", default_value_t = 1)]
    /// timed executions per measurement
    pub trials: usize,
    #[arg(short = 'W', long = "warmup", default_value_t = 0)]
    /// discarded executions before the timed trials
    pub warmup: usize,
    #[arg(short = 't', long = "threads", default_value_t = get_default_thread_no())]
    /// worker threads for the parallel counting strategy
    pub threads: usize,
    #[arg(long = "scenario", value_delimiter = ',')]
    /// run only the named scenarios (default: all)
    pub scenarios: Vec<String>,
    #[arg(short = 'c', long = "csv_output")]
    pub csv_output: bool,
    #[arg(long = "stats")]
    pub stats: bool,
    #[arg(short='v', action=ArgAction::Count)]
    /// Verbosity - use more than one v for greater detail
    pub verbose: u8,
}

pub fn get_cli() -> Result<CliCfg> {
    let cfg = CliCfg::parse();
    if cfg.max_len == 0 {
        Err("max_len must be at least 1 - element length is drawn from [0, max_len)")?
    }
    if cfg.trials == 0 {
        Err("trials must be at least 1")?
    }
    if cfg.threads == 0 {
        Err("threads must be at least 1")?
    }
    Ok(cfg)
}

// Element counts use decimal suffixes, so 300K means 300,000 elements.
fn parse_human_count(s: &str) -> std::result::Result<usize, String> {
    let mut postfix = String::new();
    let mut number = String::new();
    for c in s.chars() {
        if !c.is_ascii_digit() {
            postfix.push(c.to_ascii_lowercase());
        } else {
            number.push(c);
        }
    }
    if number.is_empty() {
        return Err(format!(
            "Missing numeric portion in count, found only: \"{}\"",
            s
        ));
    }
    let num: usize = number
        .parse()
        .map_err(|e| format!("bad count \"{}\": {}", s, e))?;
    if postfix.is_empty() {
        Ok(num)
    } else {
        match postfix.as_str() {
            "k" => Ok(num * 1_000),
            "m" => Ok(num * 1_000_000),
            "b" => Ok(num * 1_000_000_000),
            _ => Err(format!(
                "count postfix \"{}\" not understood, use K, M, or B",
                postfix.as_str()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_counts_parse() {
        assert_eq!(parse_human_count("300K").unwrap(), 300_000);
        assert_eq!(parse_human_count("2m").unwrap(), 2_000_000);
        assert_eq!(parse_human_count("12345").unwrap(), 12_345);
        assert_eq!(parse_human_count("0").unwrap(), 0);
    }

    #[test]
    fn bad_human_counts_are_rejected() {
        assert!(parse_human_count("K").is_err());
        assert!(parse_human_count("10q").is_err());
        assert!(parse_human_count("").is_err());
    }
}
