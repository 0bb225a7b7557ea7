use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use voice_actions::audio::{
    AmplitudeSource, ScriptedSource, SyntheticPattern, SyntheticSource, WavSource,
};
use voice_actions::{
    init_logging, ActionRecorder, AppConfig, EventHistory, TickReport, VoiceActionController,
};

#[derive(Parser, Debug)]
#[command(
    name = "voice_cli",
    about = "Drive the voice action controller from scripted, synthetic, WAV or live input"
)]
struct Cli {
    /// JSON configuration file (missing fields keep their defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log level for stderr output (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,
    /// Print a history summary instead of one JSON report per tick
    #[arg(long, global = true)]
    summary: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a fixed list of amplitudes, one per tick
    Scenario {
        #[arg(long, value_delimiter = ',', required = true)]
        amplitudes: Vec<f32>,
        #[arg(long, default_value_t = 0.016)]
        dt: f32,
        /// Tick indices (0-based) carrying a confirm edge
        #[arg(long, value_delimiter = ',')]
        confirm_at: Vec<usize>,
    },
    /// Run a seeded synthetic amplitude pattern
    Simulate {
        #[arg(long, default_value = "sweep")]
        pattern: SyntheticPattern,
        #[arg(long, default_value_t = 6.0)]
        seconds: f32,
        #[arg(long, default_value_t = 60)]
        fps: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Peak random deviation added to every reading
        #[arg(long, default_value_t = 0.0)]
        jitter: f32,
        /// Send a confirm edge every N seconds
        #[arg(long)]
        confirm_every: Option<f32>,
    },
    /// Replay a mono WAV file through the controller
    Replay {
        #[arg(long)]
        wav: PathBuf,
        #[arg(long, default_value_t = 60)]
        fps: u32,
    },
    /// Capture from the default microphone
    Listen {
        #[arg(long, default_value_t = 10.0)]
        seconds: f32,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let config = cli
        .config
        .as_ref()
        .map(AppConfig::load_from_file)
        .unwrap_or_default();
    let controller = VoiceActionController::new(config.controller.clone())
        .context("invalid controller configuration")?;
    let mut session = Session::new(controller, cli.summary);

    match cli.command {
        Commands::Scenario {
            amplitudes,
            dt,
            confirm_at,
        } => {
            let ticks = amplitudes.len();
            let mut source = ScriptedSource::new(amplitudes);
            for tick in 0..ticks {
                session.step(&mut source, dt, confirm_at.contains(&tick))?;
            }
        }
        Commands::Simulate {
            pattern,
            seconds,
            fps,
            seed,
            jitter,
            confirm_every,
        } => {
            let dt = frame_dt(fps)?;
            if !seconds.is_finite() {
                bail!("--seconds must be a finite number (got {seconds})");
            }
            if !jitter.is_finite() {
                bail!("--jitter must be a finite number (got {jitter})");
            }
            let mut source = SyntheticSource::new(pattern, seed, jitter);
            let mut confirms = ConfirmClock::new(confirm_every);
            let ticks = (seconds.max(0.0) * fps as f32).round() as u64;
            for tick in 0..ticks {
                let confirm = confirms.due(tick as f32 * dt);
                session.step(&mut source, dt, confirm)?;
            }
        }
        Commands::Replay { wav, fps } => {
            let dt = frame_dt(fps)?;
            let mut source = WavSource::open(&wav, config.audio.sample_window)
                .with_context(|| format!("loading {}", wav.display()))?;
            while !source.is_exhausted() {
                session.step(&mut source, dt, false)?;
            }
        }
        Commands::Listen { seconds } => listen(&mut session, &config, seconds)?,
    }

    session.finish()?;
    Ok(ExitCode::from(0))
}

#[cfg(feature = "mic")]
fn listen(session: &mut Session, config: &AppConfig, seconds: f32) -> Result<()> {
    use std::time::{Duration, Instant};
    use voice_actions::audio::MicrophoneSource;

    const FRAME: Duration = Duration::from_millis(16);

    let mut source = MicrophoneSource::open_or_silent(&config.audio);
    let start = Instant::now();
    let mut last = start;
    while start.elapsed().as_secs_f32() < seconds {
        std::thread::sleep(FRAME);
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;
        session.step(&mut source, dt, false)?;
    }
    Ok(())
}

#[cfg(not(feature = "mic"))]
fn listen(_session: &mut Session, _config: &AppConfig, _seconds: f32) -> Result<()> {
    bail!("voice_cli was built without microphone support (enable the `mic` feature)")
}

fn frame_dt(fps: u32) -> Result<f32> {
    if fps == 0 {
        bail!("--fps must be at least 1");
    }
    Ok(1.0 / fps as f32)
}

/// Emits confirm edges at a fixed period of elapsed time
struct ConfirmClock {
    period: Option<f32>,
    next: f32,
}

impl ConfirmClock {
    fn new(period: Option<f32>) -> Self {
        let period = period.filter(|p| p.is_finite() && *p > 0.0);
        Self {
            next: period.unwrap_or(0.0),
            period,
        }
    }

    fn due(&mut self, elapsed: f32) -> bool {
        let Some(period) = self.period else {
            return false;
        };
        if elapsed >= self.next {
            self.next += period;
            true
        } else {
            false
        }
    }
}

/// Controller, recording entity and history for one CLI run
struct Session {
    controller: VoiceActionController,
    entity: ActionRecorder,
    history: EventHistory,
    summary: bool,
}

impl Session {
    fn new(controller: VoiceActionController, summary: bool) -> Self {
        Self {
            controller,
            entity: ActionRecorder::new(),
            history: EventHistory::default(),
            summary,
        }
    }

    fn step<S: AmplitudeSource + ?Sized>(
        &mut self,
        source: &mut S,
        dt: f32,
        confirm: bool,
    ) -> Result<()> {
        let report = self
            .controller
            .tick_source(source, dt, confirm, &mut self.entity);
        self.history.record_all(&report.events);
        if !self.summary {
            emit_report(&report)?;
        }
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        if self.summary {
            let json = serde_json::to_string_pretty(&self.history.snapshot())?;
            println!("{json}");
        }
        Ok(())
    }
}

fn emit_report(report: &TickReport) -> Result<()> {
    println!("{}", serde_json::to_string(report)?);
    Ok(())
}
