// SPDX-License-Identifier: Apache-2.0
use clap::Parser;
extern crate latplot;

#[derive(Debug, Parser)]
#[clap(
    version,
    long_about = r#"
Plot per-process latency samples.

The input is a CSV file with a header. The first column is the sample
timestamp; the `pid` and `delay` (microseconds) columns are required.

One subplot is drawn per pid: a single plot for one pid, a 2x2 grid for
four, and a single column otherwise.

```sh
lat-plot --cdf --title "wakeup latency" --output /tmp/lat.html sched.csv 7648 7653
```

The figure is a standalone HTML file which is opened in a browser.
"#
)]
struct Cli {
    /// Plot the latency as a cumulative distribution
    #[arg(long)]
    cdf: bool,
    /// Set the figure title
    #[arg(long)]
    title: Option<String>,
    /// Set every subplot's title (defaults to "pid=<pid>" when not plotting a distribution)
    #[arg(long)]
    subtitle: Option<String>,
    /// Limit the x-axis to [0, XLIM]
    ///
    /// When plotting over time this is seconds past each pid's first sample.
    #[arg(long, verbatim_doc_comment)]
    xlim: Option<u64>,
    /// Limit the y-axis to [0, YLIM]
    #[arg(long)]
    ylim: Option<u64>,
    /// Save the figure to this (html) file
    #[arg(long, short = 'o')]
    output: Option<std::path::PathBuf>,
    /// Don't open the figure in a browser
    #[arg(long)]
    no_show: bool,
    /// Read latency samples from this csv file
    file: std::path::PathBuf,
    /// Create a chart for each of these pids
    #[arg(required = true, allow_negative_numbers = true)]
    pids: Vec<i64>,
}

impl From<&Cli> for latplot::Cfg {
    fn from(opts: &Cli) -> Self {
        Self {
            mode: if opts.cdf {
                latplot::Mode::Cdf
            } else {
                latplot::Mode::Raster
            },
            title: opts.title.clone(),
            subtitle: opts.subtitle.clone(),
            xlim: opts.xlim,
            ylim: opts.ylim,
        }
    }
}

fn describe(series: &[latplot::Series]) {
    for s in series {
        println!("{}", s.pid);
        match latplot::Summary::of(&s.delays()) {
            Some(summary) => println!("{summary}"),
            None => println!("{:<6} {:>14.6}", "count", 0.0),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let opts = Cli::parse();
    let samples = latplot::read_samples(&opts.file)?;
    let series = latplot::select(&samples, &opts.pids);
    describe(&series);
    let plot = latplot::figure::build(&series, &latplot::Cfg::from(&opts))?;
    if let Some(path) = &opts.output {
        latplot::figure::save(&plot, path)?;
    }
    if !opts.no_show {
        plot.show();
    }
    Ok(())
}
