pub mod state;

pub use state::{
    ChangeListener, HeaderToggle, SelectionState, SessionContext, StateField, StatePatch,
    StateValue,
};
