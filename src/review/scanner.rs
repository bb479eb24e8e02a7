//! # 分组结果扫描
//!
//! 扫描一个分组下每个网格目录的拼图、部件渲染图与描述文本。
//!
//! ## 约定
//! - `matte_collage_2048x2048.png` / `segmented_collage_2048x2048.png`
//! - `renders/<mesh_id>_label_<n>_collage_2048x2048.png`
//! - `caption_<suffix>.txt`；单独的 `caption.txt` 视为 `gemma`，
//!   若同时存在 `caption_gemma.txt` 则忽略 `caption.txt`
//!
//! ## 依赖关系
//! - 被 `commands/review.rs` 调用
//! - 使用 `batch/discovery.rs` 列举子目录，`batch/collector.rs` 收集渲染图
//! - 使用 `regex` 提取部件编号

use crate::batch::{discover_work_items, FileCollector};
use crate::error::{MeshkitError, Result};

use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const MATTE_COLLAGE: &str = "matte_collage_2048x2048.png";
pub const SEGMENTED_COLLAGE: &str = "segmented_collage_2048x2048.png";
const RENDERS_DIR: &str = "renders";
const BARE_CAPTION: &str = "caption.txt";
const BARE_CAPTION_SUFFIX: &str = "gemma";

/// 描述后缀筛选
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionFilter {
    All,
    Only(String),
}

impl CaptionFilter {
    pub fn parse(s: &str) -> Self {
        if s == "all" {
            CaptionFilter::All
        } else {
            CaptionFilter::Only(s.to_string())
        }
    }

    fn accepts(&self, suffix: &str) -> bool {
        match self {
            CaptionFilter::All => true,
            CaptionFilter::Only(s) => s == suffix,
        }
    }
}

/// 部件渲染拼图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderImage {
    pub label: u32,
    pub path: PathBuf,
}

/// 一条描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub suffix: String,
    pub text: String,
}

/// 单个网格的扫描结果
#[derive(Debug, Clone)]
pub struct MeshEntry {
    pub mesh_id: String,
    pub matte: bool,
    pub segmented: bool,
    pub renders: Vec<RenderImage>,
    pub captions: Vec<Caption>,
    /// 目录中没有任何条目
    pub is_empty: bool,
}

/// 分组扫描结果
#[derive(Debug, Clone)]
pub struct GroupScan {
    pub group: String,
    pub meshes: Vec<MeshEntry>,
    /// 分组内出现过的所有描述后缀（不受筛选影响）
    pub suffixes: BTreeSet<String>,
}

impl GroupScan {
    pub fn total(&self) -> usize {
        self.meshes.len()
    }

    pub fn empty_count(&self) -> usize {
        self.meshes.iter().filter(|m| m.is_empty).count()
    }

    /// 总页数
    pub fn pages(&self, per_page: usize) -> usize {
        self.total().div_ceil(per_page.max(1))
    }

    /// 第 `page` 页（从 1 开始），`page == 0` 或越界时为空
    pub fn page(&self, page: usize, per_page: usize) -> &[MeshEntry] {
        let per_page = per_page.max(1);
        let start = match page.checked_sub(1) {
            Some(index) => index.saturating_mul(per_page),
            None => return &[],
        };
        if start >= self.meshes.len() {
            return &[];
        }
        let end = (start + per_page).min(self.meshes.len());
        &self.meshes[start..end]
    }
}

/// 名称必须是单个普通路径组件
pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if invalid {
        return Err(MeshkitError::InvalidArgument(format!(
            "{} name '{}' must be a plain directory name",
            kind, name
        )));
    }
    Ok(())
}

/// 列举结果根目录下的分组
pub fn list_groups(root: &Path) -> Result<Vec<String>> {
    Ok(discover_work_items(root)?
        .into_iter()
        .map(|item| item.id().to_string())
        .collect())
}

/// 列举分组下的网格标识符
pub fn list_meshes(root: &Path, group: &str) -> Result<Vec<String>> {
    validate_name("group", group)?;
    Ok(discover_work_items(&root.join(group))?
        .into_iter()
        .map(|item| item.id().to_string())
        .collect())
}

/// 扫描整个分组
pub fn scan_group(root: &Path, group: &str, filter: &CaptionFilter) -> Result<GroupScan> {
    validate_name("group", group)?;
    let mut suffixes = BTreeSet::new();
    let mut meshes = Vec::new();

    for item in discover_work_items(&root.join(group))? {
        meshes.push(scan_mesh(item.source(), item.id(), filter, &mut suffixes)?);
    }

    Ok(GroupScan {
        group: group.to_string(),
        meshes,
        suffixes,
    })
}

/// 扫描单个网格目录
fn scan_mesh(
    dir: &Path,
    mesh_id: &str,
    filter: &CaptionFilter,
    suffixes: &mut BTreeSet<String>,
) -> Result<MeshEntry> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map_err(|e| MeshkitError::FileReadError {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    let has_named_gemma = names
        .iter()
        .any(|n| *n == format!("caption_{}.txt", BARE_CAPTION_SUFFIX));

    let mut captions = Vec::new();
    for name in &names {
        let suffix = match caption_suffix(name, has_named_gemma) {
            Some(suffix) => suffix,
            None => continue,
        };
        suffixes.insert(suffix.clone());
        if filter.accepts(&suffix) {
            let text = fs::read_to_string(dir.join(name))
                .map(|t| t.trim().to_string())
                .unwrap_or_default();
            captions.push(Caption { suffix, text });
        }
    }

    Ok(MeshEntry {
        mesh_id: mesh_id.to_string(),
        matte: dir.join(MATTE_COLLAGE).is_file(),
        segmented: dir.join(SEGMENTED_COLLAGE).is_file(),
        renders: scan_renders(&dir.join(RENDERS_DIR), mesh_id)?,
        captions,
        is_empty: names.is_empty(),
    })
}

/// 描述文件名到后缀的映射
pub fn caption_suffix(file_name: &str, has_named_gemma: bool) -> Option<String> {
    if file_name == BARE_CAPTION {
        return if has_named_gemma {
            None
        } else {
            Some(BARE_CAPTION_SUFFIX.to_string())
        };
    }
    file_name
        .strip_prefix("caption_")
        .and_then(|rest| rest.strip_suffix(".txt"))
        .map(str::to_string)
}

/// 收集 `renders/` 下的部件渲染拼图，按部件编号排序
fn scan_renders(renders_dir: &Path, mesh_id: &str) -> Result<Vec<RenderImage>> {
    let pattern = format!(
        "{}_label_*_collage_2048x2048.png",
        glob::Pattern::escape(mesh_id)
    );
    let label_re = Regex::new(&format!(
        r"^{}_label_(\d+)_collage_2048x2048\.png$",
        regex::escape(mesh_id)
    ))
    .map_err(|e| MeshkitError::InvalidArgument(e.to_string()))?;

    let mut renders: Vec<RenderImage> = FileCollector::new(renders_dir, &pattern)?
        .collect()
        .into_iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?;
            let label = label_re.captures(name)?.get(1)?.as_str().parse().ok()?;
            Some(RenderImage { label, path })
        })
        .collect();

    renders.sort_by_key(|r| r.label);
    Ok(renders)
}
