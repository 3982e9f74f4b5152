use super::*;
use crate::error::ParamError;

#[test]
fn rejects_small_n_and_degenerate_chords() {
    assert_eq!(
        CirculantParams::new(3, 2),
        Err(ParamError::TooFewVertices { n: 3, min: 4 })
    );
    for a in [0, 1, 9, 10, -1, 11, -10] {
        assert!(
            matches!(
                CirculantParams::new(10, a),
                Err(ParamError::DegenerateChord { n: 10, .. })
            ),
            "a = {a} should be degenerate"
        );
    }
}

#[test]
fn normalizes_chord_modulo_n() {
    let p = CirculantParams::new(7, -2).unwrap();
    assert_eq!((p.n(), p.a()), (7, 5));
    let q = CirculantParams::new(7, 16).unwrap();
    assert_eq!(q.a(), 2);
}

#[test]
fn table_matches_modular_arithmetic() {
    let p = CirculantParams::new(11, 3).unwrap();
    let t = build_neighbors(p, NeighborSemantics::Simple).unwrap();
    for i in 0..11usize {
        let expect = [(i + 10) % 11, (i + 1) % 11, (i + 8) % 11, (i + 3) % 11];
        assert_eq!(t.neighbors(i), expect, "vertex {i}");
        assert_eq!(t.degree(i), 4);
    }
    assert_eq!(t.column(Offset::ChordForward)[9], 1);
    for offset in Offset::ALL {
        assert_eq!(t.column(offset).len(), 11);
    }
}

#[test]
fn coincident_chords_simple_vs_multigraph() {
    let p = CirculantParams::new(8, 4).unwrap();
    assert!(p.chords_coincide());
    let simple = build_neighbors(p, NeighborSemantics::Simple).unwrap();
    let multi = build_neighbors(p, NeighborSemantics::Multigraph).unwrap();
    // +a duplicates -a: redirected to the vertex itself in the simple table.
    assert_eq!(simple.neighbors(2), [1, 3, 6, 2]);
    assert_eq!(multi.neighbors(2), [1, 3, 6, 6]);
    assert_eq!(simple.distinct_neighbors(2), vec![1, 3, 6]);
    assert_eq!(multi.distinct_neighbors(2), vec![1, 3, 6]);
    assert_eq!(simple.degree(0), 3);
}

#[test]
fn n4_a2_is_complete_graph() {
    let p = CirculantParams::new(4, 2).unwrap();
    let t = build_neighbors(p, NeighborSemantics::Simple).unwrap();
    for v in 0..4 {
        let mut nb = t.distinct_neighbors(v);
        nb.sort_unstable();
        let expect: Vec<usize> = (0..4).filter(|&u| u != v).collect();
        assert_eq!(nb, expect);
    }
}
