//! Login form. Accepts anything; there is no account system behind it.

use super::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Default)]
pub struct LoginScreen {
    pub username: TextInput,
    pub password: TextInput,
    pub focus: LoginField,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    /// Password shown as bullets
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.value.chars().count())
    }
}
