//! Parametric sweep over scale policies, content sizes, and destinations.
//!
//! Every combination is checked against the geometric guarantee of its
//! policy. Failures are collected and reported together so one run shows
//! the full extent of a regression.

use zenfit::*;

const CONTENT: [u32; 9] = [1, 2, 3, 7, 50, 99, 100, 640, 1921];
const DEST: [u32; 8] = [1, 3, 10, 33, 100, 101, 480, 1080];

/// Pixel snapping moves content by at most half a pixel.
const SNAP: f64 = 0.5 + 1e-9;
const EPS: f64 = 1e-6;

fn contains(outer: &Rect, inner: &Rect) -> bool {
    inner.x >= outer.x - EPS
        && inner.y >= outer.y - EPS
        && inner.right() <= outer.right() + EPS
        && inner.bottom() <= outer.bottom() + EPS
}

#[test]
fn parametric_policy_invariants() {
    let mut failures = Vec::new();
    let mut checked = 0u32;

    for &iw in &CONTENT {
        for &ih in &CONTENT {
            for &dw in &DEST {
                for &dh in &DEST {
                    let dest = Rect::new(3.0, 5.0, dw as f64, dh as f64);
                    let intrinsic = IntrinsicSize::new(iw, ih);
                    for policy in ScalePolicy::ALL {
                        let tag = format!("{iw}x{ih} -> {dw}x{dh} {policy:?}");
                        let p = compute_placement(intrinsic, dest, policy, None);
                        let again = compute_placement(intrinsic, dest, policy, None);
                        if p != again {
                            failures.push(format!("{tag}: not deterministic"));
                        }

                        let placed = p.content_rect();
                        if p.clip.is_none() && !contains(&dest, &placed) {
                            failures.push(format!("{tag}: overflow {placed:?} without clip"));
                        }
                        if let Some(clip) = p.clip
                            && clip != dest
                        {
                            failures.push(format!("{tag}: clip {clip:?} != dest"));
                        }

                        let exact_fit = iw == dw && ih == dh;
                        if exact_fit && p.transform.is_some() {
                            failures.push(format!("{tag}: exact fit has a transform"));
                        }

                        let (sx, sy) = p.matrix().scale_factors();
                        match policy {
                            ScalePolicy::Matrix => {
                                if p.transform.is_some() {
                                    failures.push(format!("{tag}: identity matrix transformed"));
                                }
                            }
                            ScalePolicy::FillExact => {
                                if placed != dest {
                                    failures.push(format!("{tag}: fill {placed:?} != dest"));
                                }
                            }
                            ScalePolicy::Center => {
                                if (sx, sy) != (1.0, 1.0) {
                                    failures.push(format!("{tag}: center scaled ({sx},{sy})"));
                                }
                                let left = placed.x - dest.x;
                                let right = dest.right() - placed.right();
                                if (left - right).abs() > 1.0 + EPS {
                                    failures.push(format!("{tag}: off-center {left} vs {right}"));
                                }
                            }
                            ScalePolicy::CenterCrop => {
                                if !p.covers(dest) {
                                    failures.push(format!("{tag}: crop {placed:?} leaves gaps"));
                                }
                                if sx != sy {
                                    failures.push(format!("{tag}: non-uniform ({sx},{sy})"));
                                }
                            }
                            ScalePolicy::CenterInside => {
                                if sx > 1.0 || sy > 1.0 {
                                    failures.push(format!("{tag}: upscaled ({sx},{sy})"));
                                }
                                if !contains(&dest, &placed) && sx < 1.0 {
                                    failures.push(format!("{tag}: shrunk content overflows"));
                                }
                            }
                            ScalePolicy::FitStart | ScalePolicy::FitCenter | ScalePolicy::FitEnd => {
                                if sx != sy {
                                    failures.push(format!("{tag}: non-uniform ({sx},{sy})"));
                                }
                                let lead_x = placed.x - dest.x;
                                let lead_y = placed.y - dest.y;
                                let trail_x = dest.right() - placed.right();
                                let trail_y = dest.bottom() - placed.bottom();
                                let ok = match policy {
                                    ScalePolicy::FitStart => {
                                        lead_x.abs() <= EPS && lead_y.abs() <= EPS
                                    }
                                    ScalePolicy::FitEnd => {
                                        trail_x.abs() <= SNAP && trail_y.abs() <= SNAP
                                    }
                                    _ => {
                                        (lead_x - trail_x).abs() <= 2.0 * SNAP
                                            && (lead_y - trail_y).abs() <= 2.0 * SNAP
                                    }
                                };
                                if !ok && !exact_fit {
                                    failures.push(format!(
                                        "{tag}: misaligned {placed:?} in {dest:?}"
                                    ));
                                }
                            }
                        }
                        checked += 1;
                    }
                }
            }
        }
    }

    assert!(
        failures.is_empty(),
        "Policy invariant failures ({} of {checked} checked):\n{}",
        failures.len(),
        failures.join("\n")
    );
    assert!(checked > 5_000, "Only checked {checked} combinations");
}

#[test]
fn unknown_content_fills_every_policy() {
    let dest = Rect::new(0.0, 0.0, 64.0, 48.0);
    for policy in ScalePolicy::ALL {
        for intrinsic in [
            IntrinsicSize::UNKNOWN,
            IntrinsicSize::from_raw(-1, 20),
            IntrinsicSize::from_raw(20, -1),
            IntrinsicSize::new(0, 0),
        ] {
            let p = compute_placement(intrinsic, dest, policy, Some(&Affine::uniform_scale(3.0)));
            assert_eq!(p, DrawPlacement::fill(dest), "{policy:?} {intrinsic:?}");
        }
    }
}

// ── concrete scenarios ──────────────────────────────────────────────────

#[test]
fn center_crop_100x50_into_200x200() {
    let p = compute_placement(
        IntrinsicSize::new(100, 50),
        Rect::at_origin(200.0, 200.0),
        ScalePolicy::CenterCrop,
        None,
    );
    let t = p.transform.unwrap();
    // Cover scale is max(200/100, 200/50) = 4; 400 wide content centered.
    assert_eq!(t.scale_factors(), (4.0, 4.0));
    assert_eq!(t.translation(), (-100.0, 0.0));
    assert_eq!(p.content_rect(), Rect::new(-100.0, 0.0, 400.0, 200.0));
    assert_eq!(p.clip, Some(Rect::at_origin(200.0, 200.0)));
}

#[test]
fn center_inside_100x100_into_50x200() {
    let p = compute_placement(
        IntrinsicSize::new(100, 100),
        Rect::at_origin(50.0, 200.0),
        ScalePolicy::CenterInside,
        None,
    );
    let t = p.transform.unwrap();
    assert_eq!(t.scale_factors(), (0.5, 0.5));
    assert_eq!(t.translation(), (0.0, 75.0));
}

#[test]
fn fit_rect_alignment_corners() {
    let src = Rect::at_origin(40.0, 10.0);
    let dst = Rect::new(10.0, 10.0, 80.0, 80.0);

    let start = Affine::fit_rect(src, dst, ScaleToFit::Start).map_rect(src);
    assert_eq!((start.x, start.y), (dst.x, dst.y));

    let end = Affine::fit_rect(src, dst, ScaleToFit::End).map_rect(src);
    assert_eq!((end.right(), end.bottom()), (dst.right(), dst.bottom()));

    let center = Affine::fit_rect(src, dst, ScaleToFit::Center).map_rect(src);
    assert_eq!(center.y - dst.y, dst.bottom() - center.bottom());
}

#[test]
fn custom_matrix_with_padding_origin() {
    let m = Affine::uniform_scale(0.5).then_translate(4.0, 0.0);
    let p = compute_placement(
        IntrinsicSize::new(20, 20),
        Rect::new(10.0, 10.0, 100.0, 100.0),
        ScalePolicy::Matrix,
        Some(&m),
    );
    // Custom matrix first, then the padding offset.
    assert_eq!(p.content_rect(), Rect::new(14.0, 10.0, 10.0, 10.0));
}
