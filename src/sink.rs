/// Write-only view of a single rendered element.
///
/// Implementations must tolerate the element having been detached from the
/// document; writes to a detached element are silently lost.
pub trait DisplaySink {
    fn set_text(&self, text: &str);

    /// Adds `class` when `on`, removes it otherwise.
    fn set_class(&self, class: &str, on: bool);

    fn set_style(&self, property: &str, value: &str);
}

impl<T: DisplaySink + ?Sized> DisplaySink for std::rc::Rc<T> {
    fn set_text(&self, text: &str) {
        (**self).set_text(text);
    }

    fn set_class(&self, class: &str, on: bool) {
        (**self).set_class(class, on);
    }

    fn set_style(&self, property: &str, value: &str) {
        (**self).set_style(property, value);
    }
}
