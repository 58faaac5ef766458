use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::Config;
use crate::orb::OrbAnimation;
use crate::system::collector::Collector;
use crate::system::snapshot::{DisplayFlags, SystemSnapshot};
use crate::ui::theme::Theme;

pub struct App {
    pub running: bool,
    pub collector: Collector,
    pub snapshot: SystemSnapshot,
    pub orb: OrbAnimation,
    pub theme: Theme,
    frame: u64,
    refresh_every_frames: u64,
}

impl App {
    /// Runs the startup full pass before returning.
    pub fn new(config: Config) -> Self {
        let flags = DisplayFlags {
            show_disk_usage: config.general.show_disk_usage,
            show_gpus: config.general.show_gpus,
        };
        let theme = Theme::from_config(&config.colors.theme, &config.colors.accent);
        let mut collector = Collector::new(config.sources);
        let snapshot = collector.snapshot(flags);

        App {
            running: true,
            collector,
            snapshot,
            orb: OrbAnimation::default(),
            theme,
            frame: 0,
            refresh_every_frames: config.general.refresh_every_frames.max(1),
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('d') => Action::ToggleDiskUsage,
            KeyCode::Char('g') => Action::ToggleGpus,
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleDiskUsage => {
                self.snapshot.flags.show_disk_usage = !self.snapshot.flags.show_disk_usage;
            }
            Action::ToggleGpus => {
                self.snapshot.flags.show_gpus = !self.snapshot.flags.show_gpus;
            }
            Action::Refresh => self.collector.dynamic_pass(&mut self.snapshot),
            Action::None => {}
        }
    }

    /// Advances the orb; every `refresh_every_frames` frames also runs a
    /// dynamic pass.
    pub fn on_frame(&mut self) {
        self.orb.advance();
        self.frame += 1;
        if self.frame.is_multiple_of(self.refresh_every_frames) {
            self.collector.dynamic_pass(&mut self.snapshot);
        }
    }
}
