use serde::{Deserialize, Serialize};
use std::env;
use std::process::Command;

/// Desktop environments with a known way to set the background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesktopType {
    /// Cinnamon, configured through gsettings
    Cinnamon,
    /// GNOME, configured through gsettings
    Gnome,
    /// KDE Plasma
    Kde,
    /// Sway compositor
    Sway,
    /// Hyprland compositor, wallpaper through swww
    Hyprland,
    /// Any other X11 session, wallpaper through feh
    X11,
    /// Wallpaper setting disabled
    None,
    /// Nothing recognised
    Unknown,
}

const SESSION_VARS: [&str; 3] = ["XDG_CURRENT_DESKTOP", "XDG_SESSION_DESKTOP", "DESKTOP_SESSION"];

impl DesktopType {
    /// Detect the current desktop from the session environment
    pub fn detect() -> Self {
        if !cfg!(target_os = "linux") {
            return DesktopType::Unknown;
        }
        Self::detect_with(|key| env::var(key).ok(), is_process_running)
    }

    /// Detection with injectable environment and process lookups.
    pub fn detect_with<E, P>(var: E, process_running: P) -> Self
    where
        E: Fn(&str) -> Option<String>,
        P: Fn(&str) -> bool,
    {
        for key in SESSION_VARS {
            if let Some(desktop) = var(key).as_deref().and_then(Self::from_session_name) {
                return desktop;
            }
        }

        if var("WAYLAND_DISPLAY").is_some() {
            if process_running("sway") {
                return DesktopType::Sway;
            }
            if process_running("Hyprland") {
                return DesktopType::Hyprland;
            }
        }

        if var("DISPLAY").is_some() {
            return DesktopType::X11;
        }

        DesktopType::Unknown
    }

    /// Match a session name such as `X-Cinnamon` or `ubuntu:GNOME`
    fn from_session_name(session: &str) -> Option<Self> {
        session
            .split(':')
            .map(|part| part.trim().to_lowercase())
            .find_map(|part| match part.as_str() {
                "x-cinnamon" | "cinnamon" => Some(DesktopType::Cinnamon),
                "gnome" | "gnome-xorg" | "gnome-wayland" => Some(DesktopType::Gnome),
                "kde" | "plasma" | "plasmawayland" => Some(DesktopType::Kde),
                "sway" => Some(DesktopType::Sway),
                "hyprland" => Some(DesktopType::Hyprland),
                _ => None,
            })
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            DesktopType::Cinnamon => "Cinnamon",
            DesktopType::Gnome => "GNOME",
            DesktopType::Kde => "KDE Plasma",
            DesktopType::Sway => "Sway",
            DesktopType::Hyprland => "Hyprland",
            DesktopType::X11 => "X11",
            DesktopType::None => "none",
            DesktopType::Unknown => "unknown",
        }
    }
}

fn is_process_running(process_name: &str) -> bool {
    Command::new("pgrep")
        .arg("-x")
        .arg(process_name)
        .output()
        .map(|output| !output.stdout.is_empty())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn detect(vars: &[(&str, &str)], running: &[&str]) -> DesktopType {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DesktopType::detect_with(|key| vars.get(key).cloned(), |p| running.contains(&p))
    }

    #[test]
    fn test_session_names() {
        assert_eq!(detect(&[("XDG_CURRENT_DESKTOP", "X-Cinnamon")], &[]), DesktopType::Cinnamon);
        assert_eq!(detect(&[("XDG_CURRENT_DESKTOP", "ubuntu:GNOME")], &[]), DesktopType::Gnome);
        assert_eq!(detect(&[("XDG_CURRENT_DESKTOP", "KDE")], &[]), DesktopType::Kde);
        assert_eq!(detect(&[("DESKTOP_SESSION", "sway")], &[]), DesktopType::Sway);
        assert_eq!(detect(&[("XDG_SESSION_DESKTOP", "Hyprland")], &[]), DesktopType::Hyprland);
    }

    #[test]
    fn test_wayland_falls_back_to_process_check() {
        let vars = [("WAYLAND_DISPLAY", "wayland-1")];
        assert_eq!(detect(&vars, &["Hyprland"]), DesktopType::Hyprland);
        assert_eq!(detect(&vars, &["sway"]), DesktopType::Sway);
        assert_eq!(detect(&vars, &[]), DesktopType::Unknown);
    }

    #[test]
    fn test_plain_x11_and_nothing() {
        assert_eq!(
            detect(&[("XDG_CURRENT_DESKTOP", "i3"), ("DISPLAY", ":0")], &[]),
            DesktopType::X11
        );
        assert_eq!(detect(&[], &[]), DesktopType::Unknown);
    }

    #[test]
    fn test_desktop_name() {
        assert_eq!(DesktopType::Cinnamon.name(), "Cinnamon");
        assert_eq!(DesktopType::Unknown.name(), "unknown");
    }
}
