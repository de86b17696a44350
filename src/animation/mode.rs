/// The only two values a population's progress is ever driven toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetState {
    #[default]
    Scattered,
    Assembled,
}

impl TargetState {
    /// Scalar target for the progress integrators
    pub fn value(self) -> f32 {
        match self {
            TargetState::Scattered => 0.0,
            TargetState::Assembled => 1.0,
        }
    }

    pub fn from_tree_form(tree_form: bool) -> Self {
        if tree_form {
            TargetState::Assembled
        } else {
            TargetState::Scattered
        }
    }
}

/// Owns the "assembled or not" flag set by user input between frames
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeController {
    tree_form: bool,
}

impl ModeController {
    pub fn new(tree_form: bool) -> Self {
        Self { tree_form }
    }

    pub fn is_tree_form(&self) -> bool {
        self.tree_form
    }

    /// Flip the flag, returning the new value
    pub fn toggle(&mut self) -> bool {
        self.set_tree_form(!self.tree_form);
        self.tree_form
    }

    pub fn set_tree_form(&mut self, tree_form: bool) {
        if self.tree_form != tree_form {
            log::debug!("mode -> {}", if tree_form { "assembled" } else { "scattered" });
        }
        self.tree_form = tree_form;
    }

    pub fn target(&self) -> TargetState {
        TargetState::from_tree_form(self.tree_form)
    }
}
