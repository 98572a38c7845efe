use std::io::Write;

use crate::io::error::Error;
use crate::model::graph::EncodedGraph;

/// Writes one `<molecule-id>\t<JSON>` line per encoded graph.
pub fn write_encoded<W: Write>(
    mut writer: W,
    graphs: &[(String, EncodedGraph)],
) -> Result<(), Error> {
    for (id, graph) in graphs {
        let body =
            serde_json::to_string(graph).map_err(|e| Error::serialize("encoded graph", e))?;
        writeln!(writer, "{id}\t{body}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes one `<molecule-id>\t<message>` line per failure.
pub fn write_failures<W: Write, E: std::fmt::Display>(
    mut writer: W,
    failures: &[(String, E)],
) -> Result<(), Error> {
    for (id, err) in failures {
        let message = err.to_string().replace(['\t', '\n'], " ");
        writeln!(writer, "{id}\t{message}")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_tab_separated_json_lines() {
        let graph = EncodedGraph {
            n_atom: 1,
            atom_type: vec![6],
            atom_feat: vec![[6, 4, 0]],
            bond_type: vec![0],
            bond_seg_i: vec![0],
            bond_idx_j: vec![0],
        };
        let mut out = Vec::new();
        write_encoded(&mut out, &[("CID297".to_string(), graph)]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "CID297\t{\"n_atom\":1,\"atom_type\":[6],\"atom_feat\":[[6,4,0]],\"bond_type\":[0],\"bond_seg_i\":[0],\"bond_idx_j\":[0]}\n"
        );
    }

    #[test]
    fn failure_messages_stay_on_one_line() {
        let mut out = Vec::new();
        write_failures(&mut out, &[("m1".to_string(), "bad\tthing\nhere")]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "m1\tbad thing here\n");
    }
}
