mod common;

use common::*;
use cutout_editor::normalize;

#[test]
fn mask_matches_roi_dimensions() -> anyhow::Result<()> {
    let values: Vec<f32> = (0..15 * 15).map(|i| ((i * 37) % 100) as f32 / 100.0).collect();
    let raw = ProbabilityMask::new(15, 15, values)?;

    for (w, h) in [(1, 1), (3, 7), (15, 15), (100, 80), (640, 17), (9, 300)] {
        let mask = normalize(&raw, w, h)?;
        assert_eq!(mask.dimensions(), (w, h), "mask for {}x{} ROI", w, h);
    }
    Ok(())
}

#[test]
fn all_ones_mask_covers_whole_roi() -> anyhow::Result<()> {
    let raw = ProbabilityMask::uniform(15, 15, 1.0)?;
    let mask = normalize(&raw, 100, 80)?;

    assert_eq!(mask.count_set(), 100 * 80);
    Ok(())
}

#[test]
fn all_zeros_mask_is_empty() -> anyhow::Result<()> {
    let raw = ProbabilityMask::uniform(15, 15, 0.0)?;
    let mask = normalize(&raw, 64, 48)?;

    assert_eq!(mask.count_set(), 0);
    Ok(())
}

#[test]
fn threshold_is_strictly_above_half() -> anyhow::Result<()> {
    // Same size: the resample is an exact copy, so the field stays at 0.5
    let raw = ProbabilityMask::uniform(15, 15, 0.5)?;
    let mask = normalize(&raw, 15, 15)?;

    assert_eq!(mask.count_set(), 0);
    Ok(())
}

#[test]
fn split_mask_keeps_its_sides() -> anyhow::Result<()> {
    // Left 7 columns are object, the rest background
    let values: Vec<f32> = (0..15 * 15)
        .map(|i| if i % 15 < 7 { 1.0 } else { 0.0 })
        .collect();
    let raw = ProbabilityMask::new(15, 15, values)?;
    assert_eq!(raw.get(6, 3), 1.0);
    assert_eq!(raw.get(7, 3), 0.0);

    let mask = normalize(&raw, 150, 150)?;

    for y in [0, 75, 149] {
        assert!(mask.get(0, y));
        assert!(mask.get(50, y));
        assert!(!mask.get(100, y));
        assert!(!mask.get(149, y));
    }
    Ok(())
}

#[test]
fn smoothing_removes_isolated_speck() -> anyhow::Result<()> {
    let mut values = vec![0.0f32; 15 * 15];
    values[7 * 15 + 7] = 1.0;
    let raw = ProbabilityMask::new(15, 15, values)?;

    let mask = normalize(&raw, 15, 15)?;

    assert_eq!(mask.count_set(), 0);
    Ok(())
}

#[test]
fn zero_sized_roi_is_rejected() -> anyhow::Result<()> {
    let raw = ProbabilityMask::uniform(15, 15, 1.0)?;

    assert!(matches!(
        normalize(&raw, 0, 10),
        Err(CutoutError::InvalidRegion { width: 0, height: 10 })
    ));
    assert!(matches!(
        normalize(&raw, 10, 0),
        Err(CutoutError::InvalidRegion { .. })
    ));
    Ok(())
}

#[test]
fn ragged_rows_are_rejected() {
    let rows = vec![vec![1.0, 1.0], vec![1.0]];
    assert!(matches!(
        ProbabilityMask::from_rows(rows),
        Err(CutoutError::InvalidMask(_))
    ));
    assert!(matches!(
        ProbabilityMask::from_rows(Vec::new()),
        Err(CutoutError::InvalidMask(_))
    ));
}
