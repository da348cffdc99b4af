// Author: Dustin Pilgrim
// License: MIT

/// The host form's image slot. The form owns persistence; the crop tool only
/// reports a new url (after crop + upload) or an empty string (on remove).
pub struct ImageField<F: FnMut(&str)> {
    current_image: String,
    on_image_cropped: F,
}

impl<F: FnMut(&str)> ImageField<F> {
    pub fn new(current_image: impl Into<String>, on_image_cropped: F) -> Self {
        Self {
            current_image: current_image.into(),
            on_image_cropped,
        }
    }

    pub fn current_image(&self) -> &str {
        &self.current_image
    }

    pub fn has_image(&self) -> bool {
        !self.current_image.is_empty()
    }

    pub fn set_image(&mut self, url: &str) {
        self.current_image = url.to_string();
        (self.on_image_cropped)(url);
    }

    pub fn remove(&mut self) {
        self.current_image.clear();
        (self.on_image_cropped)("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_sees_new_url_and_removal() {
        let mut seen = Vec::new();
        {
            let mut field = ImageField::new("", |url: &str| seen.push(url.to_string()));
            assert!(!field.has_image());
            field.set_image("https://cdn.example.com/me.jpg");
            assert_eq!(field.current_image(), "https://cdn.example.com/me.jpg");
            field.remove();
            assert!(!field.has_image());
        }
        assert_eq!(seen, vec!["https://cdn.example.com/me.jpg".to_string(), String::new()]);
    }
}
