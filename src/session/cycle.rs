use anyhow::Result;
use tracing::{debug, warn};

use crate::pipeline::{ModelContext, run_prediction};
use crate::presentation::{DisplayRecord, MapTable, present};
use crate::session::{ControlPanel, ResultStore, SessionResultState};

/// What caused a refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Any interaction other than the predict action.
    Refresh,
    Predict,
}

/// Output of one refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub display: DisplayRecord,
    pub map: MapTable,
    /// Per-request failure to show the user, if the predict action failed.
    pub notice: Option<String>,
}

/// One user's session: its own controls and result store over a shared context.
pub struct Session<'ctx> {
    ctx: &'ctx ModelContext,
    controls: ControlPanel,
    store: ResultStore,
    cycles: u64,
}

impl<'ctx> Session<'ctx> {
    pub fn new(ctx: &'ctx ModelContext) -> Result<Self> {
        Ok(Self {
            ctx,
            controls: ControlPanel::new(ctx.schema())?,
            store: ResultStore::new(),
            cycles: 0,
        })
    }

    pub fn context(&self) -> &'ctx ModelContext {
        self.ctx
    }

    pub fn controls(&self) -> &ControlPanel {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ControlPanel {
        &mut self.controls
    }

    pub fn state(&self) -> SessionResultState {
        self.store.state()
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Collect, optionally predict, then present.
    ///
    /// Pipeline errors become the frame's notice; the previous result stays.
    pub fn refresh(&mut self, trigger: Trigger) -> Frame {
        self.cycles += 1;
        let record = self.controls.collect();

        let notice = match trigger {
            Trigger::Refresh => None,
            Trigger::Predict => match run_prediction(self.ctx, &record, &mut self.store) {
                Ok(_) => None,
                Err(e) => {
                    warn!(error = %e, cycle = self.cycles, "prediction request failed");
                    Some(e.to_string())
                }
            },
        };

        let shown = present(&record, &self.store, self.ctx.labels(), self.ctx.legend());
        let map = shown.map_table(self.ctx.schema());
        let label = shown.label.as_str();
        debug!(cycle = self.cycles, label, "refreshed");

        Frame {
            display: shown,
            map,
            notice,
        }
    }
}
