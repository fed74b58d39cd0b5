//! Plain-text field dumps.
//!
//! `snapshot.txt` has three line groups (velocity, pressure, temperature), one
//! line each, values comma-separated in node order. `profile.csv` is the same
//! data in columns with the node position.

use crate::types::ProfileSnapshot;
use crate::{ResultsError, ResultsResult};

const PROFILE_HEADER: &str = "z_m,u_m_s,p_pa,t_k";

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_snapshot(snapshot: &ProfileSnapshot) -> String {
    let mut out = String::new();
    for field in [&snapshot.u_m_s, &snapshot.p_pa, &snapshot.t_k] {
        out.push_str(&join(field));
        out.push('\n');
    }
    out
}

pub fn format_profile_csv(snapshot: &ProfileSnapshot) -> ResultsResult<String> {
    if !snapshot.is_rectangular() {
        return Err(ResultsError::RaggedProfile);
    }
    let mut out = String::with_capacity(32 * (snapshot.len() + 1));
    out.push_str(PROFILE_HEADER);
    out.push('\n');
    for i in 0..snapshot.len() {
        out.push_str(&format!(
            "{},{},{},{}\n",
            snapshot.z_m[i], snapshot.u_m_s[i], snapshot.p_pa[i], snapshot.t_k[i]
        ));
    }
    Ok(out)
}

/// Read a profile back. The snapshot time is not part of the CSV and is left at zero.
pub fn parse_profile_csv(content: &str) -> ResultsResult<ProfileSnapshot> {
    let mut snapshot = ProfileSnapshot::default();
    let mut lines = content.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim() == PROFILE_HEADER => {}
        _ => {
            return Err(ResultsError::Malformed {
                file: "profile.csv",
                line: 1,
                message: format!("expected header `{PROFILE_HEADER}`"),
            });
        }
    }

    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let values = line
            .split(',')
            .map(|s| s.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ResultsError::Malformed {
                file: "profile.csv",
                line: idx + 1,
                message: e.to_string(),
            })?;
        let [z, u, p, t] = values[..] else {
            return Err(ResultsError::Malformed {
                file: "profile.csv",
                line: idx + 1,
                message: format!("expected 4 columns, found {}", values.len()),
            });
        };
        snapshot.z_m.push(z);
        snapshot.u_m_s.push(u);
        snapshot.p_pa.push(p);
        snapshot.t_k.push(t);
    }

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProfileSnapshot {
        ProfileSnapshot {
            time_s: 0.5,
            z_m: vec![0.0, 0.5, 1.0],
            u_m_s: vec![0.01, 0.0125, 0.015],
            p_pa: vec![2.0, 1.0, 0.0],
            t_k: vec![1000.0, 750.0, 500.0],
        }
    }

    #[test]
    fn snapshot_has_one_line_per_field() {
        let text = format_snapshot(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "0.01, 0.0125, 0.015");
        assert_eq!(lines[1], "2, 1, 0");
        assert_eq!(lines[2], "1000, 750, 500");
    }

    #[test]
    fn profile_csv_reads_back() {
        let snap = sample();
        let csv = format_profile_csv(&snap).unwrap();
        assert_eq!(
            csv,
            "z_m,u_m_s,p_pa,t_k\n0,0.01,2,1000\n0.5,0.0125,1,750\n1,0.015,0,500\n"
        );

        let back = parse_profile_csv(&csv).unwrap();
        assert_eq!(back.z_m, snap.z_m);
        assert_eq!(back.u_m_s, snap.u_m_s);
        assert_eq!(back.p_pa, snap.p_pa);
        assert_eq!(back.t_k, snap.t_k);
    }

    #[test]
    fn ragged_profile_is_refused() {
        let mut snap = sample();
        snap.t_k.pop();
        assert!(matches!(
            format_profile_csv(&snap),
            Err(ResultsError::RaggedProfile)
        ));
    }

    #[test]
    fn bad_rows_report_their_line() {
        let csv = "z_m,u_m_s,p_pa,t_k\n0,1,2,3\n0,1,2\n";
        match parse_profile_csv(csv) {
            Err(ResultsError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected {other:?}"),
        }
        assert!(parse_profile_csv("x,y\n").is_err());
    }
}
