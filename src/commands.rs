use std::{
    fs,
    io::{self, Write},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use chrono::Local;
use ring_calendar::{
    CalendarDate, DayDetail, MonthLayout, Session, SettingsStore, ViewState,
    render_svg, render_text,
};
use tracing::{debug, info};

use crate::cli::{ClockArgs, DayArgs, Format, LabelsCommand, ShowArgs};

const TICK: Duration = Duration::from_secs(1);

fn today() -> Result<CalendarDate> {
    CalendarDate::today().context("system clock is outside the supported calendar range")
}

fn detail_line(detail: &DayDetail) -> String {
    format!("{} {}", detail.date, detail.labels.join(" / "))
}

pub fn show(args: ShowArgs, store: SettingsStore) -> Result<()> {
    let today = today()?;
    let mut view = match (args.month, args.fragment.as_deref()) {
        (Some(month), _) => ViewState::for_month(month, today),
        (None, Some(fragment)) => ViewState::from_fragment(fragment, today),
        (None, None) => ViewState::new(today),
    };
    if let Some(date) = args.select {
        view.select(date);
    }

    let mut session = Session::open(store, view);
    let layout = session.render();
    debug!(fragment = %session.view().fragment(), "rendering view");

    let output = match args.format {
        Format::Text => text_view(&session, &layout),
        Format::Svg => render_svg(&layout),
        Format::Json => serde_json::to_string_pretty(&layout).context("failed to encode layout")?,
    };

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote {}", layout.year_month);
        },
        None => print!("{output}"),
    }
    Ok(())
}

fn text_view(session: &Session, layout: &MonthLayout) -> String {
    let selected = session.day_detail(layout.selected);
    format!(
        "{}\n\n{}\n{}\n",
        layout.title(),
        render_text(layout),
        detail_line(&selected)
    )
}

pub fn day(args: DayArgs, store: SettingsStore) -> Result<()> {
    let session = Session::open(store, ViewState::new(args.date));
    println!("{}", detail_line(&session.day_detail(args.date)));
    Ok(())
}

pub fn clock(args: ClockArgs, store: SettingsStore) -> Result<()> {
    let session = Session::open(store, ViewState::new(today()?));
    let mut stdout = io::stdout();
    loop {
        let labels = session
            .clock(Local::now().naive_local())
            .context("system clock is outside the supported calendar range")?;
        writeln!(stdout, "{} {}", labels.date_label, labels.time_label)?;
        stdout.flush()?;
        if !args.watch {
            return Ok(());
        }
        thread::sleep(TICK);
    }
}

pub fn labels(command: LabelsCommand, store: SettingsStore) -> Result<()> {
    let path = store.path().to_path_buf();
    let mut session = Session::open(store, ViewState::new(today()?));

    match command {
        LabelsCommand::Show => println!("{}", session.config().to_json()),
        LabelsCommand::Set {
            period,
            index,
            text,
        } => {
            let config = session
                .set_label(period, index, &text)
                .with_context(|| format!("failed to set label {index} of period {period}"))?;
            println!("{}", config.to_json());
        },
        LabelsCommand::Reset => {
            session.reset_config().context("failed to reset labels")?;
            println!("Labels reset to defaults in {}", path.display());
        },
        LabelsCommand::Import { file } => {
            session
                .import_file(&file)
                .with_context(|| format!("failed to import {}", file.display()))?;
            println!("Imported {} into {}", file.display(), path.display());
        },
        LabelsCommand::Export { dir } => {
            let config = session.config();
            let written = SettingsStore::export(&config, &dir, Local::now().naive_local())
                .context("failed to export labels")?;
            println!("{}", written.display());
        },
    }
    Ok(())
}
