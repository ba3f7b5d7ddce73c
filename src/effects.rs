//! Geometry and style strings for the decorative page effects. The browser
//! wiring lives in `frontend`; nothing here touches the document.

pub const REVEAL_SELECTOR: &str =
    ".info-card, .skill-item, .timeline-item, .project-card, .achievement-highlight, .rank-card";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";
pub const TIMELINE_THRESHOLD: f64 = 0.2;
pub const SOCIAL_SELECTOR: &str = ".social-link, .social-links a";
pub const SOCIAL_HOVER_TRANSFORM: &str = "translateY(-5px) scale(1.1)";
pub const SOCIAL_REST_TRANSFORM: &str = "translateY(0) scale(1)";
pub const TILT_REST_TRANSFORM: &str = "perspective(1000px) rotateX(0) rotateY(0) translateY(0)";
pub const RIPPLE_LIFETIME_MS: u32 = 600;
pub const BODY_REVEAL_DELAY_MS: u32 = 100;

const TILT_DAMPING: f64 = 20.0;

pub const KEYFRAMES_CSS: &str = "
    @keyframes float {
        0%, 100% {
            transform: translate(0, 0) scale(1);
            opacity: 0.5;
        }
        25% {
            transform: translate(20px, -30px) scale(1.2);
            opacity: 0.8;
        }
        50% {
            transform: translate(-20px, -60px) scale(0.8);
            opacity: 0.3;
        }
        75% {
            transform: translate(-40px, -30px) scale(1.1);
            opacity: 0.6;
        }
    }
    @keyframes ripple {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }
";

/// Styled console greeting as `(%c message, css)` pairs. The contact line is
/// only printed when the page names an address.
pub fn greeting_lines(contact_email: Option<&str>) -> Vec<(String, &'static str)> {
    let mut lines = vec![
        (
            "%c👋 Hello! Thanks for checking out my portfolio!".to_string(),
            "color: #6C63FF; font-size: 20px; font-weight: bold;",
        ),
        (
            "%c🚀 Want to collaborate? Let's connect!".to_string(),
            "color: #4CAF50; font-size: 16px;",
        ),
    ];
    if let Some(email) = contact_email {
        lines.push((format!("%c📧 Email: {email}"), "color: #FF6B6B; font-size: 14px;"));
    }
    lines
}

/// Inline styles for the three hamburger bars, top to bottom.
pub fn hamburger_styles(open: bool) -> [(&'static str, &'static str); 3] {
    if open {
        [
            ("transform", "rotate(45deg) translate(5px, 5px)"),
            ("opacity", "0"),
            ("transform", "rotate(-45deg) translate(7px, -6px)"),
        ]
    } else {
        [("transform", "none"), ("opacity", "1"), ("transform", "none")]
    }
}

/// Where a nav click should scroll to so the fixed navbar does not cover the
/// section heading.
pub fn anchor_scroll_top(section_top: f64, nav_offset: f64) -> f64 {
    section_top - nav_offset
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub size_px: f64,
    pub left_pct: f64,
    pub top_pct: f64,
    pub duration_s: f64,
    pub delay_s: f64,
}

impl Particle {
    /// `samples` are uniform draws from `[0, 1)`.
    pub fn from_samples(samples: [f64; 5]) -> Self {
        let [size, left, top, duration, delay] = samples.map(|sample| sample.clamp(0.0, 1.0));
        Self {
            size_px: size * 3.0 + 1.0,
            left_pct: left * 100.0,
            top_pct: top * 100.0,
            duration_s: duration * 20.0 + 10.0,
            delay_s: delay * 5.0,
        }
    }

    pub fn css_text(&self) -> String {
        format!(
            "position: absolute; width: {size}px; height: {size}px; \
             background: rgba(108, 99, 255, 0.5); border-radius: 50%; \
             left: {left}%; top: {top}%; \
             animation: float {duration}s {delay}s infinite ease-in-out; \
             box-shadow: 0 0 10px rgba(108, 99, 255, 0.5);",
            size = self.size_px,
            left = self.left_pct,
            top = self.top_pct,
            duration = self.duration_s,
            delay = self.delay_s,
        )
    }
}

/// Element box in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// 3D tilt toward the pointer at `(client_x, client_y)`.
pub fn tilt_transform(rect: Rect, client_x: f64, client_y: f64) -> String {
    let x = client_x - rect.left;
    let y = client_y - rect.top;
    let rotate_x = (y - rect.height / 2.0) / TILT_DAMPING;
    let rotate_y = (rect.width / 2.0 - x) / TILT_DAMPING;

    format!("perspective(1000px) rotateX({rotate_x}deg) rotateY({rotate_y}deg) translateY(-10px)")
}

/// A circle covering the button, centred on the click point.
pub fn ripple_css(rect: Rect, client_x: f64, client_y: f64) -> String {
    let size = rect.width.max(rect.height);
    let x = client_x - rect.left - size / 2.0;
    let y = client_y - rect.top - size / 2.0;

    format!(
        "position: absolute; width: {size}px; height: {size}px; border-radius: 50%; \
         background: rgba(255, 255, 255, 0.5); left: {x}px; top: {y}px; \
         transform: scale(0); animation: ripple 0.6s ease-out; pointer-events: none;"
    )
}

pub fn skill_animation_delay(index: usize) -> String {
    format!("{:.1}s", index as f64 * 0.1)
}

pub fn timeline_transition_delay(index: usize) -> String {
    format!("{:.1}s", index as f64 * 0.2)
}

/// Initial hidden styles for a timeline entry.
pub fn timeline_hidden_styles(index: usize) -> [(&'static str, String); 4] {
    [
        ("opacity", "0".to_string()),
        ("transform", "translateX(-50px)".to_string()),
        ("transition", "all 0.6s ease".to_string()),
        ("transition-delay", timeline_transition_delay(index)),
    ]
}

pub const TIMELINE_REVEALED_STYLES: [(&str, &str); 2] =
    [("opacity", "1"), ("transform", "translateX(0)")];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_adds_contact_line_only_when_an_address_is_known() {
        assert_eq!(greeting_lines(None).len(), 2);

        let lines = greeting_lines(Some("hello@example.com"));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].0, "%c📧 Email: hello@example.com");
        assert_eq!(lines[2].1, "color: #FF6B6B; font-size: 14px;");
        assert!(lines.iter().all(|(message, _)| message.starts_with("%c")));
    }

    #[test]
    fn hamburger_turns_into_a_cross_and_back() {
        let open = hamburger_styles(true);
        assert_eq!(open[0].1, "rotate(45deg) translate(5px, 5px)");
        assert_eq!(open[1], ("opacity", "0"));

        let closed = hamburger_styles(false);
        assert_eq!(closed, [("transform", "none"), ("opacity", "1"), ("transform", "none")]);
    }

    #[test]
    fn particle_samples_map_onto_ranges() {
        let low = Particle::from_samples([0.0; 5]);
        assert_eq!(low.size_px, 1.0);
        assert_eq!(low.duration_s, 10.0);
        assert_eq!(low.delay_s, 0.0);

        let mid = Particle::from_samples([0.5; 5]);
        assert_eq!(mid.size_px, 2.5);
        assert_eq!(mid.left_pct, 50.0);
        assert_eq!(mid.duration_s, 20.0);
        assert!(mid.css_text().contains("animation: float 20s 2.5s infinite"));
    }

    #[test]
    fn tilt_is_flat_at_the_centre() {
        let rect = Rect { left: 100.0, top: 50.0, width: 200.0, height: 100.0 };

        assert_eq!(
            tilt_transform(rect, 200.0, 100.0),
            "perspective(1000px) rotateX(0deg) rotateY(0deg) translateY(-10px)"
        );
        assert_eq!(
            tilt_transform(rect, 100.0, 50.0),
            "perspective(1000px) rotateX(-2.5deg) rotateY(5deg) translateY(-10px)"
        );
    }

    #[test]
    fn ripple_is_centred_on_the_click() {
        let rect = Rect { left: 10.0, top: 20.0, width: 120.0, height: 40.0 };

        let css = ripple_css(rect, 70.0, 40.0);

        assert!(css.contains("width: 120px"));
        assert!(css.contains("left: 0px; top: -40px"));
    }

    #[test]
    fn stagger_delays_have_one_decimal() {
        assert_eq!(skill_animation_delay(0), "0.0s");
        assert_eq!(skill_animation_delay(3), "0.3s");
        assert_eq!(timeline_transition_delay(3), "0.6s");
        assert_eq!(timeline_hidden_styles(1)[3], ("transition-delay", "0.2s".to_string()));
    }

    #[test]
    fn anchor_scroll_leaves_room_for_the_navbar() {
        assert_eq!(anchor_scroll_top(1_000.0, 80.0), 920.0);
    }
}
