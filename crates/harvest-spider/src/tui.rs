use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress bars for a scrape: the total, successes and failures.
pub(crate) struct ScrapeProgress {
    _multi: Option<MultiProgress>,
    pub(crate) total: ProgressBar,
    pub(crate) success: ProgressBar,
    pub(crate) fails: ProgressBar,
}

impl ScrapeProgress {
    pub(crate) fn hidden() -> Self {
        Self {
            _multi: None,
            total: ProgressBar::hidden(),
            success: ProgressBar::hidden(),
            fails: ProgressBar::hidden(),
        }
    }

    pub(crate) fn finish(&self) {
        self.fails.finish_and_clear();
        self.success.finish_and_clear();
        self.total.finish_and_clear();
    }
}

pub(crate) fn multi_progress(len: usize, tui: bool) -> crate::Result<ScrapeProgress> {
    if !tui {
        return Ok(ScrapeProgress::hidden());
    }

    // one bar per outcome, stacked under the company count
    let multi = MultiProgress::new();

    // companies read from the csv
    let total = multi.add(
        ProgressBar::new(len as u64).with_style(
            ProgressStyle::default_bar()
                .template(
                    "scraping profiles {spinner:.magenta}\n \
                     {msg:>9.white} [{bar:50.white/grey}] {human_pos}/{human_len} \
                     ({percent}%) [{elapsed}, {per_sec}, ETA {eta}]",
                )?
                .progress_chars("=> "),
        ),
    );
    total.set_message("companies");
    total.enable_steady_tick(Duration::from_millis(100));

    // profiles extracted
    let success = multi.insert_after(
        &total,
        ProgressBar::new(len as u64).with_style(
            ProgressStyle::default_bar()
                .template(" {msg:>9.green} [{bar:50.green}] {human_pos:.green}")?
                .progress_chars("=> "),
        ),
    );
    success.set_message("scraped");

    // pages that could not be fetched
    let fails = multi.insert_after(
        &success,
        ProgressBar::new(len as u64).with_style(
            ProgressStyle::default_bar()
                .template(" {msg:>9.red} [{bar:50.red}] {human_pos:.red}")?
                .progress_chars("=> "),
        ),
    );
    fails.set_message("failed");

    Ok(ScrapeProgress {
        _multi: Some(multi),
        total,
        success,
        fails,
    })
}

/// Single bar counting bytes, e.g. a download.
pub(crate) fn bytes_bar(len: u64, msg: String, tui: bool) -> crate::Result<ProgressBar> {
    if !tui {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len).with_style(
        ProgressStyle::default_bar()
            .template(
                "{msg} {spinner:.magenta}\n\
                [{elapsed_precise:.magenta}] |{bar:40.cyan/blue}| {bytes}/{total_bytes} \
                [Rate: {bytes_per_sec:.magenta}, ETA: {eta:.blue}]",
            )?
            .progress_chars("##-"),
    );
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Open-ended spinner counting items, e.g. archive entries or rows.
pub(crate) fn count_spinner(msg: String, unit: &str, tui: bool) -> crate::Result<ProgressBar> {
    if !tui {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new_spinner().with_style(
        ProgressStyle::default_spinner().template(&format!(
            "{{msg}} {{spinner:.magenta}} [{{elapsed_precise:.magenta}}] {{human_pos}} {unit} \
            [Rate: {{per_sec:.magenta}}]"
        ))?,
    );
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Section banner printed between stages in tui mode.
pub(crate) fn banner(name: &str, tui: bool) {
    if tui {
        println!("{bar}\n{name:^40}\n{bar}", bar = "=".repeat(40));
    }
}
