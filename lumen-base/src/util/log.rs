/// Provides the recommended log filter for programs which want to exclude particularly noisy
/// details of lumen's per-frame work.
///
/// The guiding principle for this filtering is that at [`log::Level::Debug`] or lower level,
/// there should be no messages produced every frame unless something is wrong.
/// Light filtering and probe blending log every decision at [`log::Level::Trace`], so those
/// messages are excluded; their warnings and debug messages are kept.
#[allow(clippy::missing_inline_in_public_items)]
pub fn standard_filter(metadata: &log::Metadata<'_>) -> bool {
    let target = metadata.target();

    let per_frame = target.starts_with("lumen::filter") || target.starts_with("lumen::blend");

    !(per_frame && metadata.level() >= log::Level::Trace)
}
