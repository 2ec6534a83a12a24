#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;

    use mapcut_script::parse_text;

    use crate::adjacencies::{AdjacenciesFile, Adjacency};
    use crate::cut::propagate_cut;
    use crate::default_map::DefaultMap;
    use crate::definitions::{DefinitionRow, DefinitionsTable};
    use crate::error::Error;
    use crate::history::blank_title_history;
    use crate::provinces::county_to_id_map;
    use crate::region::{Region, RegionFile};
    use crate::search::{find_title, titles_under};
    use crate::title::{looks_like_title, tier, Tier};
    use crate::vfs::Vfs;

    fn def_row(name: &str) -> DefinitionRow {
        DefinitionRow {
            red: 1,
            green: 2,
            blue: 3,
            name: name.to_string(),
            rest: vec!["x".to_string()],
        }
    }

    fn write_fixture(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, contents).expect("write fixture");
    }

    #[test]
    fn tier_prefixes_are_ordered() {
        assert_eq!(tier("b_roma"), Some(Tier::Barony));
        assert_eq!(tier("c_roma"), Some(Tier::County));
        assert_eq!(tier("d_latium"), Some(Tier::Duchy));
        assert_eq!(tier("k_italy"), Some(Tier::Kingdom));
        assert_eq!(tier("e_hre"), Some(Tier::Empire));
        assert!(Tier::Barony < Tier::County);
        assert!(Tier::Kingdom < Tier::Empire);
    }

    #[test]
    fn non_titles_are_rejected() {
        assert!(!looks_like_title("color"));
        assert!(!looks_like_title("x_foo"));
        assert!(!looks_like_title("c_"));
        assert!(!looks_like_title("capital"));
        assert!(!looks_like_title("c_has space"));
        assert!(looks_like_title("c_dhu'l-kadr"));
    }

    #[test]
    fn find_title_prunes_equal_or_lower_tiers() {
        let source = r#"
k_first = {
    d_inner = {
        c_one = {}
    }
}
k_target = {
    c_two = {}
}
"#;
        let root = parse_text(source, "t.txt").expect("parse");

        let block = find_title("k_target", &root).expect("find k_target");
        assert!(block.get("c_two").is_some());

        // Nested lookup still works through higher tiers.
        assert!(find_title("c_one", &root).is_some());
        assert!(find_title("k_missing", &root).is_none());
    }

    #[test]
    fn find_title_skips_non_title_keys() {
        let source = "color = { 1 2 3 }\ne_top = { k_in = {} }";
        let root = parse_text(source, "t.txt").expect("parse");
        assert!(find_title("k_in", &root).is_some());
    }

    #[test]
    fn titles_under_is_preorder_and_stops_at_baronies() {
        let source = r#"
d_dux = {
    color = { 1 2 3 }
    c_a = {
        b_a1 = {
            c_hidden = {}
        }
    }
    c_b = {}
}
"#;
        let root = parse_text(source, "t.txt").expect("parse");
        let mut titles = Vec::new();
        titles_under(&root, &mut titles);
        assert_eq!(titles, vec!["d_dux", "c_a", "b_a1", "c_b"]);
    }

    #[test]
    fn deletion_set_is_target_plus_descendants() {
        let root = parse_text("k_test = { c_a = {} c_b = {} }", "t.txt").expect("parse");
        let block = find_title("k_test", &root).expect("find target");

        let mut del_titles = vec!["k_test".to_string()];
        titles_under(block, &mut del_titles);
        assert_eq!(del_titles, vec!["k_test", "c_a", "c_b"]);
    }

    #[test]
    fn propagate_cut_scenario() {
        // Definitions [{name:"Foo"}], one adjacency 1->2; cutting the county
        // mapped to id 1 blanks the name and soft-deletes the edge.
        let mut definitions = DefinitionsTable::new(
            "province;red;green;blue;x;x",
            vec![def_row("Foo"), def_row("Bar")],
        );
        let mut adjacencies = AdjacenciesFile::new(
            "From;To;Type;Comment",
            vec![
                Adjacency {
                    from: Some(1),
                    to: Some(2),
                    rest: vec!["sea".to_string(), "strait".to_string()],
                    deleted: false,
                },
                Adjacency {
                    from: Some(2),
                    to: Some(3),
                    rest: Vec::new(),
                    deleted: false,
                },
            ],
        );
        let mut geo = RegionFile::new(vec![Region {
            name: "world_test".to_string(),
            duchies: vec!["d_gone".to_string(), "d_kept".to_string()],
            counties: vec!["c_foo".to_string()],
            provinces: vec![1, 2],
            ..Region::default()
        }]);
        let mut island = RegionFile::new(vec![Region {
            name: "islands".to_string(),
            provinces: vec![1],
            ..Region::default()
        }]);

        let county_to_id: HashMap<String, u32> =
            [("c_foo".to_string(), 1)].into_iter().collect();

        let del_titles = vec![
            "k_top".to_string(),
            "d_gone".to_string(),
            "c_foo".to_string(),
            "b_under".to_string(),
        ];

        let report = propagate_cut(
            &del_titles,
            &county_to_id,
            &mut geo,
            &mut island,
            &mut adjacencies,
            &mut definitions,
        )
        .expect("propagate");

        assert_eq!(report.titles_cut, 4);
        assert_eq!(report.counties_cut, 1);
        assert_eq!(report.adjacencies_cut, 1);

        assert_eq!(definitions.row(1).expect("row 1").name, "");
        assert_eq!(definitions.row(2).expect("row 2").name, "Bar");

        let edges: Vec<_> = adjacencies.iter().collect();
        assert!(edges[0].deleted);
        assert!(!edges[1].deleted);
        assert!(
            !adjacencies
                .iter()
                .any(|a| !a.deleted && (a.from == Some(1) || a.to == Some(1))),
            "no live edge may still reference the cut province"
        );

        let region = &geo.regions()[0];
        assert_eq!(region.duchies, vec!["d_kept"]);
        assert!(region.counties.is_empty());
        assert_eq!(region.provinces, vec![2]);
        assert!(island.regions()[0].provinces.is_empty());
    }

    #[test]
    fn propagate_cut_fails_on_unassigned_county() {
        let mut definitions = DefinitionsTable::new("h", vec![def_row("Foo")]);
        let mut adjacencies = AdjacenciesFile::new("h", Vec::new());
        let mut geo = RegionFile::new(Vec::new());
        let mut island = RegionFile::new(Vec::new());

        let err = propagate_cut(
            &["c_unknown".to_string()],
            &HashMap::new(),
            &mut geo,
            &mut island,
            &mut adjacencies,
            &mut definitions,
        )
        .expect_err("expected unassigned county error");

        assert!(matches!(err, Error::CountyUnassigned(t) if t == "c_unknown"));
    }

    #[test]
    fn vfs_overlay_later_layer_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("vanilla");
        let layer = dir.path().join("mod");
        write_fixture(&base, "map/default.map", "base");
        write_fixture(&base, "map/only_base.txt", "base-only");
        write_fixture(&layer, "map/default.map", "layered");

        let mut vfs = Vfs::new(&base);
        vfs.push_mod_root(&layer);

        let resolved = vfs.resolve("map/default.map").expect("resolve");
        assert!(resolved.starts_with(&layer));
        let (_, text) = vfs.read("map/default.map").expect("read");
        assert_eq!(text, "layered");

        assert!(vfs.resolve("map/only_base.txt").is_some());
        assert!(vfs.resolve("map/absent.txt").is_none());
    }

    #[test]
    fn default_map_water_provinces() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(
            dir.path(),
            "map/default.map",
            r#"
max_provinces = 10
definitions = "definition.csv"
adjacencies = "adjacencies.csv"
geographical_region = "geographical_region.txt"
island_region = "island_region.txt"
sea_zones = { 7 9 }
major_rivers = { 4 }
"#,
        );

        let vfs = Vfs::new(dir.path());
        let dm = DefaultMap::load(&vfs).expect("load default.map");

        assert_eq!(dm.max_provinces, 10);
        assert_eq!(dm.definitions, "definition.csv");
        assert!(dm.is_water_province(7));
        assert!(dm.is_water_province(8));
        assert!(dm.is_water_province(9));
        assert!(dm.is_water_province(4));
        assert!(!dm.is_water_province(1));
        assert!(!dm.is_water_province(10));
    }

    #[test]
    fn definitions_table_round_trip_and_blank() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(
            dir.path(),
            "map/definition.csv",
            "province;red;green;blue;x;x\n1;10;20;30;Foo;x\n2;11;21;31;Bar;x\n",
        );
        write_fixture(
            dir.path(),
            "map/default.map",
            r#"
max_provinces = 3
definitions = "definition.csv"
adjacencies = "adjacencies.csv"
geographical_region = "geographical_region.txt"
island_region = "island_region.txt"
"#,
        );

        let vfs = Vfs::new(dir.path());
        let dm = DefaultMap::load(&vfs).expect("default map");
        let mut table = DefinitionsTable::load(&vfs, &dm).expect("definitions");

        assert_eq!(table.len(), 2);
        assert_eq!(table.row(2).expect("row 2").name, "Bar");

        table.row_mut(1).expect("row 1").name.clear();
        let out = dir.path().join("out.csv");
        table.write(&out).expect("write definitions");

        let text = fs::read_to_string(&out).expect("read back");
        assert_eq!(
            text,
            "province;red;green;blue;x;x\n1;10;20;30;;x\n2;11;21;31;Bar;x\n"
        );
    }

    #[test]
    fn definitions_table_rejects_gapped_ids() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(
            dir.path(),
            "map/definition.csv",
            "province;red;green;blue;x;x\n1;10;20;30;Foo;x\n3;11;21;31;Bar;x\n",
        );
        write_fixture(
            dir.path(),
            "map/default.map",
            r#"
max_provinces = 4
definitions = "definition.csv"
adjacencies = "adjacencies.csv"
geographical_region = "geographical_region.txt"
island_region = "island_region.txt"
"#,
        );

        let vfs = Vfs::new(dir.path());
        let dm = DefaultMap::load(&vfs).expect("default map");
        let err = DefinitionsTable::load(&vfs, &dm).expect_err("gapped ids");
        assert!(matches!(err, Error::Table { line: 3, .. }));
    }

    #[test]
    fn adjacencies_round_trip_with_soft_delete() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(
            dir.path(),
            "map/adjacencies.csv",
            "From;To;Type;Comment\n1;2;sea;strait\n2;3;sea;other\n-1;-1;;\n",
        );
        write_fixture(
            dir.path(),
            "map/default.map",
            r#"
max_provinces = 4
definitions = "definition.csv"
adjacencies = "adjacencies.csv"
geographical_region = "geographical_region.txt"
island_region = "island_region.txt"
"#,
        );

        let vfs = Vfs::new(dir.path());
        let dm = DefaultMap::load(&vfs).expect("default map");
        let mut adjacencies = AdjacenciesFile::load(&vfs, &dm).expect("adjacencies");

        for adj in adjacencies.iter_mut() {
            if adj.from == Some(1) {
                adj.deleted = true;
            }
        }

        let out = dir.path().join("out.csv");
        adjacencies.write(&out).expect("write adjacencies");
        let text = fs::read_to_string(&out).expect("read back");
        assert_eq!(
            text,
            "From;To;Type;Comment\n#1;2;sea;strait\n2;3;sea;other\n-1;-1;;\n"
        );

        // Commented rows read back as already-deleted, preserving position.
        let reloaded_vfs = Vfs::new(dir.path());
        write_fixture(dir.path(), "map/adjacencies.csv", &text);
        let reloaded = AdjacenciesFile::load(&reloaded_vfs, &dm).expect("reload");
        let rows: Vec<_> = reloaded.iter().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].deleted);
        assert_eq!((rows[0].from, rows[0].to), (Some(1), Some(2)));
        assert!(!rows[1].deleted);
    }

    #[test]
    fn adjacencies_keep_blank_columns_on_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let text = "From;To;Type;Comment\n;2;sea;blank-from\n1;;land;blank-to\n-1;-1;;\n";
        write_fixture(dir.path(), "map/adjacencies.csv", text);
        write_fixture(
            dir.path(),
            "map/default.map",
            r#"
max_provinces = 4
definitions = "definition.csv"
adjacencies = "adjacencies.csv"
geographical_region = "geographical_region.txt"
island_region = "island_region.txt"
"#,
        );

        let vfs = Vfs::new(dir.path());
        let dm = DefaultMap::load(&vfs).expect("default map");
        let adjacencies = AdjacenciesFile::load(&vfs, &dm).expect("adjacencies");

        let rows: Vec<_> = adjacencies.iter().collect();
        assert_eq!((rows[0].from, rows[0].to), (None, Some(2)));
        assert_eq!((rows[1].from, rows[1].to), (Some(1), None));
        assert_eq!((rows[2].from, rows[2].to), (Some(-1), Some(-1)));

        // Untouched rows must come back byte for byte, blanks included.
        let out = dir.path().join("out.csv");
        adjacencies.write(&out).expect("write adjacencies");
        assert_eq!(fs::read_to_string(&out).expect("read back"), text);
    }

    #[test]
    fn adjacencies_reject_non_numeric_ids() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(
            dir.path(),
            "map/adjacencies.csv",
            "From;To;Type\n1;2;sea\nfoo;2;sea\n",
        );
        write_fixture(
            dir.path(),
            "map/default.map",
            r#"
max_provinces = 4
definitions = "definition.csv"
adjacencies = "adjacencies.csv"
geographical_region = "geographical_region.txt"
island_region = "island_region.txt"
"#,
        );

        let vfs = Vfs::new(dir.path());
        let dm = DefaultMap::load(&vfs).expect("default map");
        let err = AdjacenciesFile::load(&vfs, &dm).expect_err("expected table error");
        assert!(matches!(err, Error::Table { line: 3, .. }));
    }

    #[test]
    fn region_file_load_edit_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(
            dir.path(),
            "map/geographical_region.txt",
            r#"
world_test = {
    duchies = { d_gone d_kept }
    provinces = { 1 2 3 }
}
special_test = {
    regions = { world_test }
    counties = { c_foo c_bar }
}
"#,
        );

        let vfs = Vfs::new(dir.path());
        let mut regions =
            RegionFile::load(&vfs, "geographical_region.txt").expect("load regions");

        regions.delete_duchy("d_gone");
        regions.delete_county("c_foo");
        regions.delete_province(2);

        let out_dir = dir.path().join("out");
        fs::create_dir_all(out_dir.join("map")).expect("mkdir out");
        regions
            .write(&out_dir.join("map/geographical_region.txt"))
            .expect("write regions");

        let out_vfs = Vfs::new(&out_dir);
        let reloaded = RegionFile::load(&out_vfs, "geographical_region.txt").expect("reload");

        assert_eq!(reloaded.regions()[0].duchies, vec!["d_kept"]);
        assert_eq!(reloaded.regions()[0].provinces, vec![1, 3]);
        assert_eq!(reloaded.regions()[1].counties, vec!["c_bar"]);
        assert_eq!(reloaded.regions()[1].regions, vec!["world_test"]);
    }

    #[test]
    fn county_map_built_from_history_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(
            dir.path(),
            "map/default.map",
            r#"
max_provinces = 5
definitions = "definition.csv"
adjacencies = "adjacencies.csv"
geographical_region = "geographical_region.txt"
island_region = "island_region.txt"
sea_zones = { 4 4 }
"#,
        );
        write_fixture(
            dir.path(),
            "map/definition.csv",
            "province;red;green;blue;x;x\n1;1;1;1;Foo;x\n2;2;2;2;Bar;x\n3;3;3;3;;x\n4;4;4;4;Sea;x\n",
        );
        // Province 1 assigned; province 2 has a blank record (tolerated);
        // province 3 is wasteland (blank name); province 4 is water.
        write_fixture(
            dir.path(),
            "history/provinces/1 - Foo.txt",
            "title = c_foo\nculture = roman\n",
        );
        write_fixture(dir.path(), "history/provinces/2 - Bar.txt", "# nothing here\n");

        let vfs = Vfs::new(dir.path());
        let dm = DefaultMap::load(&vfs).expect("default map");
        let defs = DefinitionsTable::load(&vfs, &dm).expect("definitions");

        let map = county_to_id_map(&vfs, &dm, &defs).expect("county map");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("c_foo"), Some(&1));
    }

    #[test]
    fn county_map_duplicate_assignment_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(
            dir.path(),
            "map/default.map",
            r#"
max_provinces = 3
definitions = "definition.csv"
adjacencies = "adjacencies.csv"
geographical_region = "geographical_region.txt"
island_region = "island_region.txt"
"#,
        );
        write_fixture(
            dir.path(),
            "map/definition.csv",
            "province;red;green;blue;x;x\n1;1;1;1;Foo;x\n2;2;2;2;Bar;x\n",
        );
        write_fixture(dir.path(), "history/provinces/1 - Foo.txt", "title = c_test\n");
        write_fixture(dir.path(), "history/provinces/2 - Bar.txt", "title = c_test\n");

        let vfs = Vfs::new(dir.path());
        let dm = DefaultMap::load(&vfs).expect("default map");
        let defs = DefinitionsTable::load(&vfs, &dm).expect("definitions");

        let err = county_to_id_map(&vfs, &dm, &defs).expect_err("duplicate county");
        match err {
            Error::AmbiguousCounty {
                county,
                first,
                second,
            } => {
                assert_eq!(county, "c_test");
                assert_eq!((first, second), (1, 2));
            }
            other => panic!("expected ambiguous county error, got {}", other),
        }
    }

    #[test]
    fn county_map_rejects_non_county_assignment() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(
            dir.path(),
            "map/default.map",
            r#"
max_provinces = 2
definitions = "definition.csv"
adjacencies = "adjacencies.csv"
geographical_region = "geographical_region.txt"
island_region = "island_region.txt"
"#,
        );
        write_fixture(
            dir.path(),
            "map/definition.csv",
            "province;red;green;blue;x;x\n1;1;1;1;Foo;x\n",
        );
        write_fixture(dir.path(), "history/provinces/1 - Foo.txt", "title = d_foo\n");

        let vfs = Vfs::new(dir.path());
        let dm = DefaultMap::load(&vfs).expect("default map");
        let defs = DefinitionsTable::load(&vfs, &dm).expect("definitions");

        let err = county_to_id_map(&vfs, &dm, &defs).expect_err("bad assignment");
        assert!(matches!(err, Error::Data { .. }));
    }

    #[test]
    fn blank_title_history_writes_overrides_and_cleans_stale_ones() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(dir.path(), "history/titles/c_foo.txt", "1066.9.15 = {}\n");

        let out_root = dir.path().join("out");
        write_fixture(&out_root, "history/titles/stale.txt", "old");

        let vfs = Vfs::new(dir.path());
        let del_titles = vec!["c_foo".to_string(), "c_nohistory".to_string()];
        let blanked = blank_title_history(&vfs, &del_titles, &out_root).expect("blank");

        assert_eq!(blanked, 1);
        let written = out_root.join("history/titles/c_foo.txt");
        assert!(written.is_file());
        assert_eq!(fs::read_to_string(&written).expect("read"), "");
        assert!(
            !out_root.join("history/titles/stale.txt").exists(),
            "stale overrides must be removed"
        );
        assert!(!out_root.join("history/titles/c_nohistory.txt").exists());
    }
}
