//! `demo-phase-machine`.

use std::rc::Rc;

use crate::host::{EventBus, PhaseMachineConfig, PhaseMachineCtor, PhaseStateMachine};

/// Phase machine constructor that spells out the host's phase sets when
/// the config leaves them empty.
pub struct DemoPhaseMachine;

impl DemoPhaseMachine {
    /// Factory key.
    pub const TYPE: &'static str = "demo-phase-machine";

    /// Build a machine, filling empty phase sets from `host_phases`.
    pub fn create_with(
        host_phases: &PhaseMachineConfig,
        config: PhaseMachineConfig,
        event_bus: Option<Rc<dyn EventBus>>,
    ) -> PhaseStateMachine {
        PhaseStateMachine::new(config.or_defaults(host_phases), event_bus)
    }

    /// Build a machine against every phase the host knows.
    pub fn create(config: PhaseMachineConfig, event_bus: Option<Rc<dyn EventBus>>) -> PhaseStateMachine {
        Self::create_with(&PhaseMachineConfig::all(), config, event_bus)
    }

    /// Factory constructor bound to the host's phase sets.
    #[must_use]
    pub fn ctor(host_phases: PhaseMachineConfig) -> PhaseMachineCtor {
        Rc::new(move |config, event_bus| Self::create_with(&host_phases, config, event_bus))
    }
}
