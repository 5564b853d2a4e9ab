use crate::domain::entity::{ValidationError, ValidationResult};
use crate::models::{Contact, ContactDraft};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub nombre: String,
    pub cargo: String,
    pub telefono: String,
}

impl ContactForm {
    pub fn from_contact(c: &Contact) -> Self {
        Self {
            nombre: c.nombre.clone(),
            cargo: c.cargo.clone(),
            telefono: c.telefono.clone(),
        }
    }

    pub fn validate(&self) -> ValidationResult<ContactDraft> {
        let nombre = self.nombre.trim();
        if nombre.is_empty() {
            return Err(ValidationError("Nombre obligatorio"));
        }
        let telefono = self.telefono.trim();
        if telefono.is_empty() {
            return Err(ValidationError("Teléfono obligatorio"));
        }
        Ok(ContactDraft {
            nombre: nombre.to_string(),
            cargo: self.cargo.trim().to_string(),
            telefono: telefono.to_string(),
        })
    }
}

/// `tel:` link with spaces and dashes removed.
pub fn tel_href(telefono: &str) -> String {
    let digits: String = telefono
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{}", digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let f = ContactForm { nombre: " Rosa ".into(), cargo: " Jefa ".into(), telefono: " 600 11 22 33 ".into() };
        let d = f.validate().unwrap();
        assert_eq!(d.nombre, "Rosa");
        assert_eq!(d.cargo, "Jefa");
        assert_eq!(d.telefono, "600 11 22 33");

        let missing_phone = ContactForm { telefono: "  ".into(), ..f.clone() };
        assert_eq!(missing_phone.validate().unwrap_err().0, "Teléfono obligatorio");
        let missing_name = ContactForm { nombre: String::new(), ..f };
        assert_eq!(missing_name.validate().unwrap_err().0, "Nombre obligatorio");
    }

    #[test]
    fn test_tel_href() {
        assert_eq!(tel_href("+34 600-11-22"), "tel:+346001122");
    }
}
