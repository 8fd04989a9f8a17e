use std::path::Path;

use layout_check::manifest::{self, compare_with_reference};

use crate::err;

pub fn capture(dir: &Path) -> eyre::Result<()> {
    let manifest = manifest::capture(dir)?;

    for image in &manifest.images {
        log::info!("captured `{}` ({} bytes)", image.name, image.size);
    }

    log::info!(
        "reference for {} {} written to `{}`",
        manifest.toolchain.arch,
        manifest.toolchain.os,
        dir.display()
    );

    Ok(())
}

pub fn compare(dir: &Path) -> eyre::Result<()> {
    let (_, diffs) = compare_with_reference(dir)?;

    let mut mismatches = 0;

    for diff in &diffs {
        if diff.is_match() {
            println!("{}: ok", diff.name);
            continue;
        }

        mismatches += 1;

        println!(
            "{}: differs (reference {} bytes, this build {} bytes)",
            diff.name, diff.reference_size, diff.actual_size
        );

        for range in &diff.ranges {
            println!("    bytes {}..{}", range.start, range.end);
        }
    }

    if mismatches > 0 {
        return err!("{mismatches} of {} layouts differ", diffs.len());
    }

    Ok(())
}
