use anyhow::{Context, Result};
use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::pipeline::ModelContext;
use crate::presentation::{GeoJsonMapSink, MapSink, TextMapSink};
use crate::session::{ControlPanel, Frame, Session, Trigger};
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::cli::menu::{MenuAction, menu_items};

/// Terminal front end: one refresh cycle per user action.
pub struct InteractiveApp<'ctx, D: PromptDriver, W: Write> {
    session: Session<'ctx>,
    driver: D,
    out: W,
    export_dir: PathBuf,
}

impl<'ctx, D: PromptDriver, W: Write> InteractiveApp<'ctx, D, W> {
    pub fn new(ctx: &'ctx ModelContext, driver: D, out: W, export_dir: &Path) -> Result<Self> {
        Ok(Self {
            session: Session::new(ctx)?,
            driver,
            out,
            export_dir: export_dir.to_path_buf(),
        })
    }

    pub fn session(&self) -> &Session<'ctx> {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn run(&mut self) -> Result<()> {
        let mut trigger = Trigger::Refresh;
        loop {
            let frame = self.session.refresh(trigger);
            self.render(&frame)?;

            trigger = match self.ask_action()? {
                MenuAction::AdjustInput => {
                    self.adjust_input()?;
                    Trigger::Refresh
                }
                MenuAction::Predict => Trigger::Predict,
                MenuAction::ExportMap => {
                    self.export_map(&frame)?;
                    Trigger::Refresh
                }
                MenuAction::Quit => break,
            };
        }
        info!(cycles = self.session.cycles(), "session ended");
        Ok(())
    }

    fn render(&mut self, frame: &Frame) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", frame.display)?;
        if let Some(notice) = &frame.notice {
            writeln!(self.out, "✗ {notice}")?;
        }
        let mut sink = TextMapSink::new(&mut self.out);
        sink.render(&frame.map, self.session.context().legend())?;
        Ok(())
    }

    fn ask_action(&self) -> Result<MenuAction> {
        let items = menu_items::<MenuAction>();
        let texts: Vec<String> = items.iter().map(|(_, t)| t.clone()).collect();
        let idx = self
            .driver
            .ask_select("Choose an action:", "↑/↓ to navigate, ↵ to select", &texts)?;
        items
            .get(idx)
            .map(|(k, _)| *k)
            .context("menu selection out of range")
    }

    fn adjust_input(&mut self) -> Result<()> {
        let specs = self.session.controls().specs().to_vec();
        let names = input_choices(self.session.controls());
        let idx = self
            .driver
            .ask_select("Which input?", "Inputs are kept between refreshes", &names)?;
        let spec = specs.get(idx).context("input selection out of range")?;

        let current = self.session.controls().get(&spec.name).unwrap_or(spec.default);
        let help = format!("{} to {}", spec.min, spec.max);
        let answer = self
            .driver
            .ask_f64(&spec.title, &help, current, spec.min, spec.max)?;
        self.session.controls_mut().set(&spec.name, answer)?;
        Ok(())
    }

    fn export_map(&mut self, frame: &Frame) -> Result<()> {
        let default_name = format!("firerisk-map-{}.geojson", Utc::now().format("%Y%m%dT%H%M%S"));
        let name = self
            .driver
            .ask_string("Export file name", "GeoJSON FeatureCollection", &default_name)?;
        let name = name.trim();
        let name = if name.is_empty() { default_name.as_str() } else { name };
        let path = self.export_dir.join(name);

        let ctx = self.session.context();
        let mut sink = GeoJsonMapSink::new(&path, ctx.map_view().clone());
        sink.render(&frame.map, ctx.legend())
            .with_context(|| format!("failed writing map export {}", path.display()))?;

        info!(path = %path.display(), markers = frame.map.len(), "map exported");
        writeln!(self.out, "✓ map written to {}", path.display())?;
        Ok(())
    }
}

/// Prompt text per control; fields the model never sees are tagged.
fn input_choices(controls: &ControlPanel) -> Vec<String> {
    let map_only: Vec<&str> = controls.display_only_fields().collect();
    controls
        .specs()
        .iter()
        .map(|s| {
            let mut text = match &s.description {
                Some(d) => format!("{}  ({d})", s.title),
                None => s.title.clone(),
            };
            if map_only.contains(&s.name.as_str()) {
                text.push_str(" [map only]");
            }
            text
        })
        .collect()
}
