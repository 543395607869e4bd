use wgpu::{CompositeAlphaMode, SurfaceError, TextureFormat};

use crate::coords::SurfaceSize;

use super::SurfaceErrorAction;

/// Picks the swapchain format: an sRGB 8-bit format when asked for and
/// offered, else the first one the surface lists.
pub(crate) fn choose_surface_format(
    formats: &[TextureFormat],
    prefer_srgb: bool,
) -> Option<TextureFormat> {
    if prefer_srgb {
        let srgb = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Rgba8UnormSrgb]
            .into_iter()
            .find(|f| formats.contains(f));
        if srgb.is_some() {
            return srgb;
        }
    }

    formats.first().copied()
}

/// Picks the compositing mode. Falls back to any non-opaque mode before
/// settling for the first one, so a transparent clear stays transparent
/// wherever the platform allows it.
pub(crate) fn choose_alpha_mode(
    modes: &[CompositeAlphaMode],
    requested: Option<CompositeAlphaMode>,
) -> CompositeAlphaMode {
    requested
        .filter(|m| modes.contains(m))
        .or_else(|| {
            modes
                .iter()
                .copied()
                .find(|m| matches!(m, CompositeAlphaMode::PreMultiplied | CompositeAlphaMode::PostMultiplied))
        })
        .or_else(|| modes.first().copied())
        .unwrap_or(CompositeAlphaMode::Auto)
}

/// Reconfigures for `new_size`. Empty or unchanged sizes leave the current
/// configuration in place and return `false`.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut SurfaceSize,
    new_size: SurfaceSize,
) -> bool {
    if new_size.is_empty() || new_size == *size {
        return false;
    }

    *size = new_size;
    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);

    log::debug!("surface reconfigured to {}x{}", new_size.width, new_size.height);
    true
}

pub(crate) fn classify_surface_error(err: &SurfaceError) -> SurfaceErrorAction {
    match err {
        SurfaceError::Lost | SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_format_preferred_when_offered() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&formats, false), Some(TextureFormat::Bgra8Unorm));
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn alpha_mode_keeps_transparency_when_possible() {
        use CompositeAlphaMode::*;

        assert_eq!(choose_alpha_mode(&[Opaque, PreMultiplied], Some(PreMultiplied)), PreMultiplied);
        assert_eq!(choose_alpha_mode(&[Opaque, PostMultiplied], Some(PreMultiplied)), PostMultiplied);
        assert_eq!(choose_alpha_mode(&[Opaque], Some(PreMultiplied)), Opaque);
        assert_eq!(choose_alpha_mode(&[], None), Auto);
    }

    #[test]
    fn surface_errors_are_classified() {
        assert_eq!(classify_surface_error(&SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(classify_surface_error(&SurfaceError::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(classify_surface_error(&SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert!(classify_surface_error(&SurfaceError::OutOfMemory).is_fatal());
    }
}
