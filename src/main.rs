use std::error::Error;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event as CEvent, KeyCode};
use tracing::{error, info};
use tui::{backend::CrosstermBackend, Terminal};

use docente_dash::aggregator::chart_for;
use docente_dash::config::Args;
use docente_dash::dashboard::{Dashboard, SelectionControl};
use docente_dash::dataset;
use docente_dash::keys::{GroupKey, MetricKey};
use docente_dash::terminal::RawModeGuard;
use docente_dash::{logging, ui};

enum Event<I> {
    Input(I),
    Tick,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if args.export {
        logging::init_stderr(args.debug);
        return export(&args);
    }

    logging::init_file(&args.log_file, args.debug)?;
    let (metric, group) = args.selection()?;
    let dataset = dataset::load_global(&args.data)?;
    let mut dashboard = Dashboard::new(dataset, metric, group);

    let _raw_mode = RawModeGuard::enter()?;

    let (tx, rx) = mpsc::channel();
    let tick_rate = Duration::from_millis(200);
    thread::spawn(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            match event::poll(timeout) {
                Ok(true) => {
                    if let Ok(CEvent::Key(key)) = event::read() {
                        if tx.send(Event::Input(key)).is_err() {
                            return;
                        }
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    error!("input polling failed: {}", e);
                    return;
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if let Ok(_) = tx.send(Event::Tick) {
                    last_tick = Instant::now();
                }
            }
        }
    });

    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    info!(metric = metric.key(), group = group.key(), "dashboard started");

    loop {
        terminal.draw(|rect| ui::draw(rect, &dashboard))?;

        match rx.recv()? {
            Event::Input(event) => match event.code {
                KeyCode::Char('q') => {
                    terminal.clear()?;
                    break;
                }
                KeyCode::Char('p') => dashboard.select_metric(MetricKey::Portfolio),
                KeyCode::Char('e') => dashboard.select_metric(MetricKey::KnowledgeTest),
                KeyCode::Char('m') | KeyCode::Tab => dashboard.toggle_metric(),
                KeyCode::Right => dashboard.next_group(),
                KeyCode::Left => dashboard.previous_group(),
                KeyCode::Char(c @ '1'..='5') => {
                    let index = c as usize - '1' as usize;
                    dashboard.select_group(GroupKey::ALL[index]);
                }
                _ => {}
            },
            Event::Tick => {}
        }
    }

    info!("dashboard closed");
    Ok(())
}

fn export(args: &Args) -> Result<(), Box<dyn Error>> {
    let dataset = dataset::load_global(&args.data)?;
    let chart = chart_for(dataset, &args.metric, &args.group)?;
    println!("{}", chart.to_json()?);
    Ok(())
}
