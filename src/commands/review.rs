//! # review 命令实现
//!
//! 在终端中审阅分割/渲染结果并记录人工质检状态。
//!
//! ## 功能
//! - 列出分组
//! - 分组概览表（拼图、部件渲染、描述），分页显示
//! - 列出渲染未通过的网格
//! - 查看与更新 `<group>_status.json`
//!
//! ## 依赖关系
//! - 使用 `cli/review.rs` 定义的参数
//! - 使用 `review/scanner.rs`, `review/store.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::review::{GroupArg, MarkArgs, ReviewArgs, ReviewCommands, SummaryArgs};
use crate::error::{MeshkitError, Result};
use crate::models::{CheckKind, GroupStatus};
use crate::review::{self, CaptionFilter, GroupScan, StatusStore};
use crate::utils::output::{self, mark};
use crate::utils::progress;

use std::path::Path;
use tabled::{Table, Tabled};

/// 概览表行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Render OK")]
    render_ok: &'static str,
    #[tabled(rename = "Mesh ID")]
    mesh_id: String,
    #[tabled(rename = "Matte")]
    matte: &'static str,
    #[tabled(rename = "Segmented")]
    segmented: &'static str,
    #[tabled(rename = "Renders")]
    renders: String,
    #[tabled(rename = "Captions")]
    captions: String,
}

/// 状态表行
#[derive(Debug, Clone, Tabled)]
struct StatusRow {
    #[tabled(rename = "Mesh ID")]
    mesh_id: String,
    #[tabled(rename = "Render OK")]
    render_ok: &'static str,
    #[tabled(rename = "Captions")]
    captions: String,
}

/// 执行 review 命令
pub fn execute(args: ReviewArgs) -> Result<()> {
    match args.command {
        ReviewCommands::Groups => groups(&args.root),
        ReviewCommands::Summary(s) => summary(&args.root, s),
        ReviewCommands::Failed(g) => failed(&args.root, g),
        ReviewCommands::Status(g) => status(&args.root, g),
        ReviewCommands::Mark(m) => mark_check(&args.root, m),
    }
}

fn groups(root: &Path) -> Result<()> {
    output::print_header("Groups");
    let groups = review::list_groups(root)?;
    if groups.is_empty() {
        output::print_warning(&format!("No groups found under {}", root.display()));
        return Ok(());
    }
    for group in &groups {
        println!("  {}", group);
    }
    output::print_done(&format!("{} group(s)", groups.len()));
    Ok(())
}

fn summary(root: &Path, args: SummaryArgs) -> Result<()> {
    if args.page == 0 {
        return Err(MeshkitError::InvalidArgument(
            "--page starts at 1".to_string(),
        ));
    }
    if args.per_page == 0 {
        return Err(MeshkitError::InvalidArgument(
            "--per-page must be at least 1".to_string(),
        ));
    }

    output::print_header(&format!("Mesh Results for {}", args.group));

    let spinner = progress::create_scan_spinner(&args.group);
    let scan = review::scan_group(root, &args.group, &CaptionFilter::parse(&args.caption_suffix));
    spinner.finish_and_clear();
    let scan = scan?;

    let status = StatusStore::for_group(root, &args.group).load();
    let mesh_ids: Vec<&str> = scan.meshes.iter().map(|m| m.mesh_id.as_str()).collect();
    let render_ok = render_ok_count(&mesh_ids, &status);

    output::print_info(&format!(
        "{}: total meshes: {} | Render OK: {} | Not OK: {} | Empty: {}",
        scan.group,
        scan.total(),
        render_ok,
        scan.total() - render_ok,
        scan.empty_count()
    ));
    if !scan.suffixes.is_empty() {
        output::print_info(&format!(
            "Caption suffixes: {}",
            scan.suffixes.iter().cloned().collect::<Vec<_>>().join(", ")
        ));
    }

    let rows = summary_rows(&scan, &status, args.page, args.per_page);
    if rows.is_empty() {
        output::print_warning(&format!("Page {} is empty", args.page));
        return Ok(());
    }
    println!("{}", Table::new(&rows));

    if args.details {
        for mesh in scan.page(args.page, args.per_page) {
            output::print_separator();
            println!("{}", mesh.mesh_id);
            for render in &mesh.renders {
                println!("  label{}: {}", render.label, render.path.display());
            }
            for caption in &mesh.captions {
                println!("  [{}] {}", caption.suffix, caption.text);
            }
        }
    }

    output::print_info(&format!(
        "Page {}/{}",
        args.page,
        scan.pages(args.per_page)
    ));
    Ok(())
}

fn failed(root: &Path, args: GroupArg) -> Result<()> {
    output::print_header(&format!("Failed Renders for {}", args.group));

    let meshes = review::list_meshes(root, &args.group)?;
    let status = StatusStore::for_group(root, &args.group).load();
    let failed = failed_meshes(&meshes, &status);

    for mesh in &failed {
        output::print_item_fail(mesh, "render not OK");
    }
    output::print_done(&format!(
        "Total meshes: {} | Failed renders: {}",
        meshes.len(),
        failed.len()
    ));
    Ok(())
}

fn status(root: &Path, args: GroupArg) -> Result<()> {
    review::validate_name("group", &args.group)?;
    output::print_header(&format!("Status for {}", args.group));

    let store = StatusStore::for_group(root, &args.group);
    let status = store.load();
    if status.is_empty() {
        output::print_warning(&format!("No status recorded in {}", store.path().display()));
        return Ok(());
    }

    println!("{}", Table::new(status_rows(&status)));
    Ok(())
}

fn mark_check(root: &Path, args: MarkArgs) -> Result<()> {
    review::validate_name("group", &args.group)?;
    review::validate_name("mesh", &args.mesh_id)?;

    let mesh_dir = root.join(&args.group).join(&args.mesh_id);
    if !mesh_dir.is_dir() {
        return Err(MeshkitError::DirectoryNotFound {
            path: mesh_dir.display().to_string(),
        });
    }

    let kind = match (&args.caption, args.render) {
        (Some(suffix), _) => CheckKind::Caption(suffix.clone()),
        (None, true) => CheckKind::Render,
        (None, false) => {
            return Err(MeshkitError::InvalidArgument(
                "specify --render or --caption <SUFFIX>".to_string(),
            ))
        }
    };
    let checked = !args.unchecked;

    let store = StatusStore::for_group(root, &args.group);
    store.update(&args.mesh_id, &kind, checked)?;

    let what = match &kind {
        CheckKind::Render => "render".to_string(),
        CheckKind::Caption(suffix) => format!("caption '{}'", suffix),
    };
    output::print_marked(&args.mesh_id, &what, checked);
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 汇总辅助
// ─────────────────────────────────────────────────────────────

fn is_render_ok(status: &GroupStatus, mesh_id: &str) -> bool {
    status.get(mesh_id).map(|s| s.render).unwrap_or(false)
}

fn render_ok_count(mesh_ids: &[&str], status: &GroupStatus) -> usize {
    mesh_ids
        .iter()
        .filter(|id| is_render_ok(status, id))
        .count()
}

fn failed_meshes(mesh_ids: &[String], status: &GroupStatus) -> Vec<String> {
    mesh_ids
        .iter()
        .filter(|id| !is_render_ok(status, id))
        .cloned()
        .collect()
}

fn summary_rows(
    scan: &GroupScan,
    status: &GroupStatus,
    page: usize,
    per_page: usize,
) -> Vec<SummaryRow> {
    scan.page(page, per_page)
        .iter()
        .map(|mesh| {
            let mesh_status = status.get(&mesh.mesh_id);
            let renders = if mesh.renders.is_empty() {
                "–".to_string()
            } else {
                mesh.renders
                    .iter()
                    .map(|r| format!("label{}", r.label))
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            let captions = mesh
                .captions
                .iter()
                .map(|c| {
                    let ok = mesh_status
                        .and_then(|s| s.captions.get(&c.suffix))
                        .copied()
                        .unwrap_or(false);
                    format!("{}:{}", c.suffix, mark(ok))
                })
                .collect::<Vec<_>>()
                .join(" ");

            SummaryRow {
                render_ok: mark(mesh_status.map(|s| s.render).unwrap_or(false)),
                mesh_id: mesh.mesh_id.clone(),
                matte: mark(mesh.matte),
                segmented: mark(mesh.segmented),
                renders,
                captions,
            }
        })
        .collect()
}

fn status_rows(status: &GroupStatus) -> Vec<StatusRow> {
    status
        .iter()
        .map(|(mesh_id, st)| StatusRow {
            mesh_id: mesh_id.clone(),
            render_ok: mark(st.render),
            captions: st
                .captions
                .iter()
                .map(|(suffix, ok)| format!("{}:{}", suffix, mark(*ok)))
                .collect::<Vec<_>>()
                .join(" "),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MeshStatus;
    use std::fs;

    fn status_with(entries: &[(&str, bool)]) -> GroupStatus {
        entries
            .iter()
            .map(|(id, render)| {
                (
                    id.to_string(),
                    MeshStatus {
                        render: *render,
                        ..Default::default()
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_render_counts() {
        let status = status_with(&[("m1", true), ("m2", false), ("gone", true)]);
        assert_eq!(render_ok_count(&["m1", "m2", "m3"], &status), 1);

        let meshes = vec!["m1".to_string(), "m2".to_string(), "m3".to_string()];
        assert_eq!(failed_meshes(&meshes, &status), vec!["m2", "m3"]);
    }

    #[test]
    fn test_status_rows() {
        let mut status = status_with(&[("m1", true)]);
        status
            .get_mut("m1")
            .unwrap()
            .captions
            .insert("qwen".into(), false);
        let rows = status_rows(&status);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].render_ok, "✅");
        assert_eq!(rows[0].captions, "qwen:❌");
    }

    #[test]
    fn test_mark_updates_sidecar() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("g/m1")).unwrap();

        mark_check(
            tmp.path(),
            MarkArgs {
                group: "g".into(),
                mesh_id: "m1".into(),
                render: true,
                caption: None,
                unchecked: false,
            },
        )
        .unwrap();
        mark_check(
            tmp.path(),
            MarkArgs {
                group: "g".into(),
                mesh_id: "m1".into(),
                render: false,
                caption: Some("gemma".into()),
                unchecked: true,
            },
        )
        .unwrap();

        let status = StatusStore::for_group(tmp.path(), "g").try_load().unwrap();
        assert!(status["m1"].render);
        assert_eq!(status["m1"].captions.get("gemma"), Some(&false));
    }

    #[test]
    fn test_mark_unknown_mesh() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("g")).unwrap();
        let err = mark_check(
            tmp.path(),
            MarkArgs {
                group: "g".into(),
                mesh_id: "nope".into(),
                render: true,
                caption: None,
                unchecked: false,
            },
        )
        .unwrap_err();
        assert!(matches!(err, MeshkitError::DirectoryNotFound { .. }));
        assert!(!tmp.path().join("g_status.json").exists());
    }

    #[test]
    fn test_summary_rows_page() {
        let tmp = tempfile::TempDir::new().unwrap();
        for id in ["a", "b", "c"] {
            fs::create_dir_all(tmp.path().join("g").join(id)).unwrap();
        }
        fs::write(tmp.path().join("g/b/caption_qwen.txt"), "lamp").unwrap();
        let scan = review::scan_group(tmp.path(), "g", &CaptionFilter::All).unwrap();
        let status = status_with(&[("b", true)]);

        let rows = summary_rows(&scan, &status, 1, 2);
        assert_eq!(rows.len(), 2);
        assert!(summary_rows(&scan, &status, 0, 2).is_empty());
        assert_eq!(rows[1].mesh_id, "b");
        assert_eq!(rows[1].render_ok, "✅");
        assert_eq!(rows[1].captions, "qwen:❌");
        assert_eq!(rows[0].renders, "–");

        assert!(summary(
            tmp.path(),
            SummaryArgs {
                group: "g".into(),
                caption_suffix: "all".into(),
                page: 1,
                per_page: 0,
                details: false,
            }
        )
        .is_err());
    }

    #[test]
    fn test_summary_rejects_page_zero() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("g/a")).unwrap();

        let err = summary(
            tmp.path(),
            SummaryArgs {
                group: "g".into(),
                caption_suffix: "all".into(),
                page: 0,
                per_page: 2,
                details: false,
            },
        )
        .unwrap_err();
        assert!(matches!(err, MeshkitError::InvalidArgument(_)));
    }
}
