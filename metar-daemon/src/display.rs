//! Human-readable dump of a fetched report, printed in verbose mode.

use std::fmt::{Display, Write};

use crate::fetch::RawReport;

/// Width the dotted labels are padded to.
const LABEL_WIDTH: usize = 17;

/// Render every populated field of `report`, one labelled line each.
///
/// Optional extras (sea-level pressure, precipitation, ...) are listed with a
/// `+` marker and only when the service sent them.
pub fn report_summary(report: &RawReport) -> String {
    let mut out = String::new();

    labelled(&mut out, "IcaoID", &report.icao_id);
    labelled(&mut out, "ReceiptTime", &or_dash(report.receipt_time.as_deref()));
    labelled(&mut out, "ObsTime", &report.obs_time);
    labelled(&mut out, "ReportTime", &report.report_time);
    labelled(&mut out, "Metar Type", &or_dash(report.metar_type.as_deref()));
    labelled(&mut out, "Temp", &report.temp);
    labelled(&mut out, "Dewp", &report.dewp);
    labelled(&mut out, "Wind dir", &or_dash(report.wdir.as_ref()));
    labelled(&mut out, "Wind speed", &or_dash(report.wspd.as_ref()));
    labelled(&mut out, "Visib", &or_dash(report.visib.as_ref()));
    labelled(&mut out, "Altimeter", &format!("{:.1}", report.altim));

    if let Some(wx) = report.wx_string.as_deref() {
        labelled(&mut out, "+ Wx string", &wx);
    }
    let extras = [
        ("+ SLP", report.slp),
        ("+ Pres Tend", report.pres_tend),
        ("+ Max Temp", report.max_t),
        ("+ Min Temp", report.min_t),
        ("+ 24h Max Temp", report.max_t24),
        ("+ 24h Min Temp", report.min_t24),
        ("+ Precip", report.precip),
        ("+ Precip 3hr", report.pcp3hr),
        ("+ Precip 6hr", report.pcp6hr),
        ("+ Precip 24hr", report.pcp24hr),
        ("+ Snow", report.snow),
        ("+ Vertical vis", report.vert_vis),
    ];
    for (label, value) in extras {
        if let Some(v) = value {
            labelled(&mut out, label, &v);
        }
    }

    labelled(&mut out, "QC Field", &or_dash(report.qc_field));
    labelled(&mut out, "Raw METAR", &report.raw_ob);
    labelled(&mut out, "Latitude", &or_dash(report.lat));
    labelled(&mut out, "Longitude", &or_dash(report.lon));
    labelled(&mut out, "Elevation", &report.elev);
    labelled(&mut out, "Airport name", &or_dash(report.name.as_deref()));
    labelled(&mut out, "Cover", &or_dash(report.cover.as_deref()));

    for (i, layer) in report.clouds.iter().enumerate() {
        let base = layer.base.map(|b| b.to_string()).unwrap_or_default();
        let _ = writeln!(out, "    + Layer {}: {} {:>5}", i + 1, layer.cover, base);
    }

    labelled(&mut out, "FltCat", &or_dash(report.flt_cat.as_deref()));
    out
}

/// Append `label`, padded with dots, then `value`.
fn labelled(out: &mut String, label: &str, value: &dyn Display) {
    let dots = LABEL_WIDTH.saturating_sub(label.len());
    // Writing to a String cannot fail
    let _ = writeln!(out, "  {label}{} {value}", ".".repeat(dots));
}

fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RawCloudLayer;
    use crate::fetch::fixtures::sample_report;

    #[test]
    fn summary_of_sample() {
        let text = report_summary(&sample_report());

        assert!(text.starts_with("  IcaoID........... KCGI\n"));
        assert!(text.contains("  Wind dir......... VRB\n"));
        assert!(text.contains("  Visib............ 10+\n"));
        assert!(text.contains("  Altimeter........ 1019.5\n"));
        assert!(text.contains("  Elevation........ 104\n"));
        assert!(text.contains("    + Layer 1: CLR      \n"));
        assert!(text.ends_with("  FltCat........... VFR\n"));
    }

    #[test]
    fn extras_only_when_present() {
        let mut report = sample_report();
        report.slp = None;
        assert!(!report_summary(&report).contains("+ SLP"));

        report.slp = Some(1019.4);
        report.pcp6hr = Some(0.02);
        let text = report_summary(&report);
        assert!(text.contains("  + SLP............ 1019.4\n"));
        assert!(text.contains("  + Precip 6hr..... 0.02\n"));
        assert!(!text.contains("+ Snow"));
    }

    #[test]
    fn layers_are_numbered_with_bases() {
        let mut report = sample_report();
        report.clouds = vec![
            RawCloudLayer {
                cover: "FEW".into(),
                base: Some(1200),
            },
            RawCloudLayer {
                cover: "OVC".into(),
                base: Some(25000),
            },
        ];

        let text = report_summary(&report);
        assert!(text.contains("    + Layer 1: FEW  1200\n"));
        assert!(text.contains("    + Layer 2: OVC 25000\n"));
    }

    #[test]
    fn missing_values_render_as_dash() {
        let mut report = sample_report();
        report.name = None;
        report.wdir = None;

        let text = report_summary(&report);
        assert!(text.contains("  Airport name..... -\n"));
        assert!(text.contains("  Wind dir......... -\n"));
    }
}
