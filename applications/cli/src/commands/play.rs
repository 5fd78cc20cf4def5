/// Interactive recitation
///
/// Drives a [`SessionController`] from two sources: end-of-clip reports from
/// the audio output and single-letter commands read line by line from stdin.
use std::io::Write;
use std::num::NonZeroU32;

use quran_api_client::SurahDetail;
use quran_core::{verse_display_text, Reciter, SurahNumber, Translation, VerseNumber};
use quran_playback::{
    AudioOutput, PlaybackEvent, PlaybackSelection, RepeatCount, SessionConfig, SessionController,
    SkipReason,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, warn};

use super::{surah_title, verse_range, write_verse, BISMILLAH};
use crate::audio::{Completion, DesktopOutput};
use crate::error::Result;
use crate::state::AppState;

pub const HELP: &str = "Commands: n next, p previous, s stop, a play all, v <n> play verse, q quit";

/// Options of the `play` command
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub surah: SurahNumber,
    pub from: Option<u16>,
    pub to: Option<u16>,
    /// Plays of each verse (0 repeats until stopped); saved default when unset
    pub verse_repeat: Option<u32>,
    /// Passes over the range; saved default when unset
    pub passes: Option<u32>,
    /// Start with this single verse instead of the range
    pub verse: Option<u16>,
    pub reciter: Option<Reciter>,
    pub translation: Option<Translation>,
}

/// A line typed while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Next,
    Previous,
    Stop,
    PlayAll,
    PlayVerse(u16),
    Quit,
}

/// Parse one input line; `None` for anything unrecognised
pub fn parse_command(line: &str) -> Option<ControlCommand> {
    let mut words = line.split_whitespace();
    let command = match words.next()?.to_ascii_lowercase().as_str() {
        "n" | "next" => ControlCommand::Next,
        "p" | "prev" | "previous" => ControlCommand::Previous,
        "s" | "stop" => ControlCommand::Stop,
        "a" | "all" => ControlCommand::PlayAll,
        "v" | "verse" => ControlCommand::PlayVerse(words.next()?.parse().ok()?),
        "q" | "quit" | "exit" => ControlCommand::Quit,
        _ => return None,
    };
    match words.next() {
        Some(_) => None,
        None => Some(command),
    }
}

/// Play a surah on the default audio device, reading commands from stdin
pub async fn run<W: Write>(state: &AppState, options: PlayOptions, out: &mut W) -> Result<()> {
    let (completions_tx, completions) = mpsc::unbounded_channel();
    let output = DesktopOutput::new(state.audio_cache(), Handle::current(), completions_tx)?;
    let lines = BufReader::new(tokio::io::stdin());

    writeln!(out, "{}", HELP)?;
    play_with(state, output, completions, lines, options, out).await
}

/// Play with any audio output and input source
///
/// Returns on `q`, or once input is exhausted and playback has gone idle.
pub async fn play_with<O, R, W>(
    state: &AppState,
    output: O,
    completions: UnboundedReceiver<Completion>,
    input: R,
    options: PlayOptions,
    out: &mut W,
) -> Result<()>
where
    O: AudioOutput,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let reciter = match options.reciter {
        Some(reciter) => reciter,
        None => state.preferences.reciter().await?,
    };
    let translation = match options.translation.clone() {
        Some(translation) => translation,
        None => state.preferences.translation().await?,
    };
    let verse_repeat = match options.verse_repeat {
        Some(count) => count,
        None => state.preferences.verse_repeat().await?,
    };
    let passes = match options.passes {
        Some(count) => count,
        None => state.preferences.range_repeat().await?,
    };

    let config = SessionConfig {
        infinite_repeat_cap: state.config.playback.infinite_repeat_cap,
    };
    let mut controller = SessionController::new(output, config);
    controller.set_reciter(reciter);
    controller.set_translation(translation.clone());
    controller.set_default_verse_repeat(RepeatCount::from_count(verse_repeat));

    let mut player = Player {
        state,
        controller,
        reciter,
        translation,
        current: None,
    };
    player.load(options.surah, out).await?;

    let range = verse_range(options.surah, options.from, options.to)?;
    let selection = PlaybackSelection::range(
        VerseNumber::new(*range.start())?,
        Some(VerseNumber::new(*range.end())?),
    )
    .with_verse_repeat(RepeatCount::from_count(verse_repeat))
    .with_range_repeat(NonZeroU32::new(passes).unwrap_or(NonZeroU32::MIN));
    player.controller.set_selection(selection)?;

    match options.verse {
        Some(verse) => player.controller.play_verse(VerseNumber::new(verse)?)?,
        None => player.controller.play_all()?,
    }

    player.event_loop(completions, input, out).await
}

struct Player<'a, O: AudioOutput> {
    state: &'a AppState,
    controller: SessionController<O>,
    reciter: Reciter,
    translation: Translation,
    current: Option<SurahDetail>,
}

impl<O: AudioOutput> Player<'_, O> {
    async fn load<W: Write>(&mut self, surah: SurahNumber, out: &mut W) -> Result<()> {
        let detail = self
            .state
            .api
            .quran()
            .surah_detail(surah, &self.translation, self.reciter)
            .await?;

        let playable = detail.verses.iter().filter(|v| v.is_playable()).count();
        writeln!(out)?;
        writeln!(out, "{}", surah_title(&detail.summary))?;
        writeln!(
            out,
            "{} · {} of {} verses have audio",
            self.reciter.display_name(),
            playable,
            detail.verses.len()
        )?;

        self.controller.load_surah(surah, &detail.verses)?;
        self.current = Some(detail);
        Ok(())
    }

    async fn event_loop<R, W>(
        &mut self,
        mut completions: UnboundedReceiver<Completion>,
        input: R,
        out: &mut W,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        let mut input_open = true;

        loop {
            self.report_events(out).await?;

            if !input_open && !self.controller.session().is_active() {
                break;
            }

            tokio::select! {
                Some((token, outcome)) = completions.recv() => {
                    self.controller.on_playback_finished(token, outcome);
                }
                line = lines.next_line(), if input_open => match line {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match parse_command(&line) {
                            Some(ControlCommand::Quit) => {
                                self.controller.stop();
                                break;
                            }
                            Some(command) => self.apply(command, out)?,
                            None => writeln!(out, "{}", HELP)?,
                        }
                    }
                    Ok(None) => input_open = false,
                    Err(e) => {
                        warn!(error = %e, "Input closed");
                        input_open = false;
                    }
                },
                else => break,
            }
        }

        self.report_events(out).await
    }

    fn apply<W: Write>(&mut self, command: ControlCommand, out: &mut W) -> Result<()> {
        debug!(?command, "Control command");
        let result = match command {
            ControlCommand::Next => self.controller.next(),
            ControlCommand::Previous => self.controller.previous(),
            ControlCommand::Stop => {
                self.controller.stop();
                Ok(())
            }
            ControlCommand::PlayAll => self.controller.play_all(),
            ControlCommand::PlayVerse(n) => match VerseNumber::new(n) {
                Ok(verse) => self.controller.play_verse(verse),
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    return Ok(());
                }
            },
            ControlCommand::Quit => Ok(()),
        };

        if let Err(e) = result {
            writeln!(out, "{}", e)?;
        }
        Ok(())
    }

    /// Print queued events and load any surah the controller asked for
    async fn report_events<W: Write>(&mut self, out: &mut W) -> Result<()> {
        loop {
            let events = self.controller.drain_events();
            if events.is_empty() {
                return Ok(());
            }

            for event in events {
                match event {
                    PlaybackEvent::VerseStarted {
                        surah,
                        verse,
                        repeat,
                        pass,
                    } => self.print_verse(surah, verse, repeat, pass, out)?,
                    PlaybackEvent::BismillahStarted { .. } => writeln!(out, "{}", BISMILLAH)?,
                    PlaybackEvent::VerseSkipped {
                        surah,
                        verse,
                        reason,
                    } => match reason {
                        SkipReason::NoAudio => writeln!(out, "Skipped {}:{} (no audio)", surah, verse)?,
                        SkipReason::Failed(message) => {
                            writeln!(out, "Skipped {}:{} ({})", surah, verse, message)?
                        }
                    },
                    PlaybackEvent::PassCompleted { pass, restarting } => {
                        if restarting {
                            writeln!(out, "Pass {} complete, starting again", pass)?;
                        } else {
                            writeln!(out, "Pass {} complete", pass)?;
                        }
                    }
                    PlaybackEvent::Stopped => writeln!(out, "Stopped")?,
                    PlaybackEvent::NavigateToSurah { surah, .. } => {
                        if let Err(e) = self.load(surah, out).await {
                            writeln!(out, "{}", e)?;
                            if let Some(hint) = e.hint() {
                                writeln!(out, "{}", hint)?;
                            }
                        }
                    }
                    PlaybackEvent::Error { message } => writeln!(out, "Playback error: {}", message)?,
                    PlaybackEvent::ModeChanged { mode } => debug!(?mode, "Mode changed"),
                }
            }
        }
    }

    fn print_verse<W: Write>(
        &self,
        surah: SurahNumber,
        verse: VerseNumber,
        repeat: u32,
        pass: u32,
        out: &mut W,
    ) -> Result<()> {
        let found = self
            .current
            .as_ref()
            .filter(|d| d.summary.number == surah)
            .and_then(|d| d.verses.get(verse.index()));

        if repeat > 1 || pass > 1 {
            writeln!(out, "({}:{} play {}, pass {})", surah, verse, repeat, pass)?;
        }
        match found {
            Some(v) => write_verse(
                out,
                verse,
                verse_display_text(surah, verse, &v.arabic_text),
                v.translated_text.as_deref().map(str::trim),
            ),
            None => write_verse(out, verse, "", None),
        }
    }
}
