//! Modal / drawer shell: title, close control, body, footer buttons.
//!
//! The shell only knows about its chrome. Whatever sits in the body is the
//! caller's business; the shell turns clicks into [`ModalSignal`]s.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

/// Centered dialog or side drawer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    #[default]
    Center,
    Right,
}

/// What a click inside the overlay asks the owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalSignal {
    Submit,
    Cancel,
    /// Clear the body's inputs (filter drawer).
    Reset,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonRole {
    #[default]
    Secondary,
    Primary,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub role: ButtonRole,
    pub signal: ModalSignal,
    pub disabled: bool,
    /// Shows a busy indicator.
    pub busy: bool,
}

impl Button {
    pub fn new(label: &str, role: ButtonRole, signal: ModalSignal) -> Self {
        Self {
            label: label.into(),
            role,
            signal,
            disabled: false,
            busy: false,
        }
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

/// Declarative submit/cancel footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterConfig {
    pub submit_button: bool,
    pub submit_text: String,
    pub cancel_button: bool,
    pub cancel_text: String,
    pub loading: bool,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            submit_button: true,
            submit_text: "Submit".into(),
            cancel_button: true,
            cancel_text: "Cancel".into(),
            loading: false,
        }
    }
}

impl FooterConfig {
    /// Cancel first, submit last. While loading the submit button is
    /// disabled and busy; cancel stays usable.
    pub fn buttons(&self) -> Vec<Button> {
        let mut buttons = Vec::with_capacity(2);
        if self.cancel_button {
            buttons.push(Button::new(
                &self.cancel_text,
                ButtonRole::Secondary,
                ModalSignal::Cancel,
            ));
        }
        if self.submit_button {
            buttons.push(
                Button::new(&self.submit_text, ButtonRole::Primary, ModalSignal::Submit)
                    .disabled(self.loading)
                    .busy(self.loading),
            );
        }
        buttons
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Footer {
    #[default]
    None,
    /// Caller-supplied buttons, used as given.
    Actions(Vec<Button>),
    Config(FooterConfig),
}

impl Footer {
    pub fn buttons(&self) -> Vec<Button> {
        match self {
            Self::None => Vec::new(),
            Self::Actions(buttons) => buttons.clone(),
            Self::Config(config) => config.buttons(),
        }
    }
}

/// Interaction with the overlay chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalInput {
    Backdrop,
    CloseControl,
    /// Footer button by position.
    Button(usize),
}

/// Overlay shell around a body of type `B`. Owners build one only while the
/// overlay is showing; a closed overlay has no shell at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Modal<B> {
    pub title: String,
    pub size: ModalSize,
    pub placement: Placement,
    pub footer: Footer,
    pub body: B,
}

/// Render output of a [`Modal`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView<B> {
    pub title: String,
    pub size: ModalSize,
    pub placement: Placement,
    pub body: B,
    pub buttons: Vec<Button>,
}

impl<B> Modal<B> {
    pub fn new(title: impl Into<String>, body: B) -> Self {
        Self {
            title: title.into(),
            size: ModalSize::Md,
            placement: Placement::Center,
            footer: Footer::None,
            body,
        }
    }

    #[must_use]
    pub fn size(mut self, size: ModalSize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn drawer(mut self) -> Self {
        self.placement = Placement::Right;
        self
    }

    #[must_use]
    pub fn footer(mut self, footer: Footer) -> Self {
        self.footer = footer;
        self
    }

    /// Maps an interaction to a signal. Backdrop and close control always
    /// cancel. Disabled and missing buttons do nothing.
    pub fn handle(&self, input: ModalInput) -> Option<ModalSignal> {
        match input {
            ModalInput::Backdrop | ModalInput::CloseControl => Some(ModalSignal::Cancel),
            ModalInput::Button(index) => self
                .footer
                .buttons()
                .get(index)
                .filter(|b| !b.disabled)
                .map(|b| b.signal),
        }
    }

    pub fn view(&self) -> ModalView<B>
    where
        B: Clone,
    {
        ModalView {
            title: self.title.clone(),
            size: self.size,
            placement: self.placement,
            body: self.body.clone(),
            buttons: self.footer.buttons(),
        }
    }

    pub fn into_view(self) -> ModalView<B> {
        let buttons = self.footer.buttons();
        ModalView {
            title: self.title,
            size: self.size,
            placement: self.placement,
            body: self.body,
            buttons,
        }
    }
}
