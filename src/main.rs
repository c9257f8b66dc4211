use atty::Stream;
use crossterm::style::{Color, ResetColor, SetForegroundColor};
use itertools::Itertools;
use prettytable::{format, Cell, Row, Table};
use std::error::Error;
use std::io::Write;
use std::time::Instant;

mod cli;
mod count;
mod dataset;
mod timing;

use cli::{get_cli, CliCfg};
use count::Strategy;
use cpu_time::ProcessTime;
use timing::{measure, Measurement};

#[cfg(not(target_os = "windows"))]
#[global_allocator]
pub static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

// Each scenario pits a baseline strategy against a candidate over one
// freshly generated dataset.
const SCENARIOS: [(&str, Strategy, Strategy); 4] = [
    ("for_vs_filter", Strategy::Loop, Strategy::Filter),
    ("indexed_vs_filter", Strategy::Indexed, Strategy::Filter),
    ("foreach_vs_filter", Strategy::Foreach, Strategy::Filter),
    ("seq_vs_par", Strategy::Filter, Strategy::ParFilter),
];

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", &err);
        std::process::exit(1);
    }
}

struct ResultRow {
    scenario: &'static str,
    strategy: &'static str,
    m: Measurement,
}

fn run() -> Result<(), Box<dyn Error>> {
    let cfg = get_cli()?;
    let start_f = Instant::now();
    let startcpu = ProcessTime::now();

    rayon::ThreadPoolBuilder::new()
        .num_threads(cfg.threads)
        .build_global()?;

    let selected = select_scenarios(&cfg)?;

    if cfg.verbose >= 1 {
        eprintln!(
            "elements: {}  max_len: {}  trials: {}  warmup: {}  threads: {}  scenarios: {}",
            cfg.size,
            cfg.max_len,
            cfg.trials,
            cfg.warmup,
            cfg.threads,
            selected.iter().map(|(n, _, _)| *n).join(",")
        );
    }

    let colored = atty::is(Stream::Stdout) && !cfg.csv_output;

    let mut rows: Vec<ResultRow> = Vec::with_capacity(selected.len() * 2);
    for (name, base, cand) in selected {
        // fresh dataset per scenario; both sides see the identical input
        let mut rng = dataset::rng_for(cfg.seed);
        let data = dataset::generate(cfg.size, cfg.max_len, &mut rng);

        let m_base = measure(cfg.trials, cfg.warmup, || base.run(&data));
        let m_cand = measure(cfg.trials, cfg.warmup, || cand.run(&data));

        if m_base.count != m_cand.count {
            return Err(format!(
                "{}: {} counted [{}] but {} counted [{}] over the same dataset",
                name,
                base.name(),
                m_base.count,
                cand.name(),
                m_cand.count
            )
            .into());
        }

        let head = if colored {
            format!("{}{}{}", SetForegroundColor(Color::Blue), name, ResetColor)
        } else {
            name.to_string()
        };
        let counts_line = format!(
            "{} ::  {} count [{}]   ||   {} count [{}]",
            head,
            base.name(),
            m_base.count,
            cand.name(),
            m_cand.count
        );
        let times_line = format!(
            "{} ::  {} time [{} ms]   ||   {} time [{} ms]",
            head,
            base.name(),
            m_base.wall_ms(),
            cand.name(),
            m_cand.wall_ms()
        );
        // machine output stays clean on stdout in csv mode
        if cfg.csv_output {
            eprintln!("{counts_line}");
            eprintln!("{times_line}");
        } else {
            println!("{counts_line}");
            println!("{times_line}");
        }

        if cfg.verbose >= 2 {
            eprintln!(
                "{} {} trial wall us: [{}]",
                name,
                base.name(),
                m_base.samples_us.iter().join(",")
            );
            eprintln!(
                "{} {} trial wall us: [{}]",
                name,
                cand.name(),
                m_cand.samples_us.iter().join(",")
            );
        }

        rows.push(ResultRow {
            scenario: name,
            strategy: base.name(),
            m: m_base,
        });
        rows.push(ResultRow {
            scenario: name,
            strategy: cand.name(),
            m: m_cand,
        });
    }

    if cfg.csv_output {
        write_csv(&cfg, &rows)?;
    } else {
        write_table(&cfg, &rows)?;
    }

    if cfg.stats || cfg.verbose >= 1 {
        let elapsed = start_f.elapsed();
        let sec: f64 = (elapsed.as_secs() as f64) + (elapsed.subsec_nanos() as f64 / 1_000_000_000.0);
        let elapsedcpu = startcpu.elapsed();
        let seccpu: f64 =
            (elapsedcpu.as_secs() as f64) + (elapsedcpu.subsec_nanos() as f64 / 1_000_000_000.0);
        eprintln!(
            "measurements: {}  elements: {}  time: {:.3}  cpu: {:.3}",
            rows.len(),
            cfg.size,
            sec,
            seccpu
        );
    }

    Ok(())
}

fn select_scenarios(cfg: &CliCfg) -> Result<Vec<(&'static str, Strategy, Strategy)>, Box<dyn Error>> {
    if cfg.scenarios.is_empty() {
        return Ok(SCENARIOS.to_vec());
    }
    let mut picked = Vec::with_capacity(cfg.scenarios.len());
    for want in &cfg.scenarios {
        match SCENARIOS.iter().find(|(n, _, _)| n == want) {
            Some(s) => picked.push(*s),
            None => {
                return Err(format!(
                    "unknown scenario \"{}\", expected one of: {}",
                    want,
                    SCENARIOS.iter().map(|(n, _, _)| *n).join(", ")
                )
                .into())
            }
        }
    }
    Ok(picked)
}

fn write_table(cfg: &CliCfg, rows: &[ResultRow]) -> Result<(), Box<dyn Error>> {
    let mut celltable = Table::new();
    celltable.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    {
        let mut vcell = vec![
            Cell::new("scenario"),
            Cell::new("strategy"),
            Cell::new("count"),
            Cell::new("wall_ms"),
            Cell::new("cpu_ms"),
        ];
        if cfg.trials > 1 {
            for h in ["min_us", "avg_us", "p50_us", "p95_us", "max_us"] {
                vcell.push(Cell::new(h));
            }
        }
        celltable.set_titles(Row::new(vcell));
    }
    for r in rows {
        let mut vcell = vec![
            Cell::new(r.scenario),
            Cell::new(r.strategy),
            Cell::new(&r.m.count.to_string()),
            Cell::new(&r.m.wall_ms().to_string()),
            Cell::new(&r.m.cpu_ms().to_string()),
        ];
        if cfg.trials > 1 {
            if let Some(s) = r.m.stats() {
                for v in [s.min_us, s.avg_us, s.p50_us, s.p95_us, s.max_us] {
                    vcell.push(Cell::new(&v.to_string()));
                }
            }
        }
        celltable.add_row(Row::new(vcell));
    }
    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    celltable.print(&mut writer)?;
    Ok(())
}

fn write_csv(cfg: &CliCfg, rows: &[ResultRow]) -> Result<(), Box<dyn Error>> {
    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    let mut line_out = String::with_capacity(128);
    line_out.push_str("scenario,strategy,count,wall_ms,cpu_ms");
    if cfg.trials > 1 {
        line_out.push_str(",min_us,avg_us,p50_us,p95_us,max_us");
    }
    line_out.push('\n');
    writer.write_all(line_out.as_bytes())?;
    for r in rows {
        line_out.clear();
        line_out.push_str(&format!(
            "{},{},{},{},{}",
            r.scenario,
            r.strategy,
            r.m.count,
            r.m.wall_ms(),
            r.m.cpu_ms()
        ));
        if cfg.trials > 1 {
            if let Some(s) = r.m.stats() {
                line_out.push_str(&format!(
                    ",{},{},{},{},{}",
                    s.min_us, s.avg_us, s.p50_us, s.p95_us, s.max_us
                ));
            }
        }
        line_out.push('\n');
        writer.write_all(line_out.as_bytes())?;
    }
    Ok(())
}
