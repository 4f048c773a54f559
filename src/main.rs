// ==========================================
// 宣教分队分配系统 - 命令行入口
// ==========================================
// 用法: mission-distribution <registrants.json> <分队数>
// 输入: 录入层产出的已规范化报名者 JSON 数组
// 输出: 运行记录 JSON(stdout)
// ==========================================

use anyhow::{bail, Context, Result};
use mission_distribution::api::DistributionApi;
use mission_distribution::config::load_profile_or_default;
use mission_distribution::domain::Registrant;
use mission_distribution::logging;

fn main() -> Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", mission_distribution::APP_NAME);
    tracing::info!("系统版本: {}", mission_distribution::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let input_path = match args.next() {
        Some(path) => path,
        None => bail!("用法: mission-distribution <registrants.json> <分队数>"),
    };
    let number_of_sites: usize = match args.next() {
        Some(value) => value
            .parse()
            .with_context(|| format!("分队数无法解析: {}", value))?,
        None => bail!("用法: mission-distribution <registrants.json> <分队数>"),
    };

    // 读取已规范化的报名者列表
    let content = std::fs::read_to_string(&input_path)
        .with_context(|| format!("读取报名者文件失败: {}", input_path))?;
    let registrants: Vec<Registrant> =
        serde_json::from_str(&content).context("解析报名者 JSON 失败")?;
    tracing::info!(
        registrant_count = registrants.len(),
        number_of_sites,
        "输入加载完成"
    );

    // 加载策略参数(缺省回退默认值)
    let profile = load_profile_or_default()?;

    // 执行分配
    let api = DistributionApi::new(profile);
    let result = api
        .run(registrants, number_of_sites)
        .map_err(|e| anyhow::anyhow!("分配失败: {}", e))?;

    for summary in &result.site_summaries {
        tracing::info!(
            site_number = summary.site_number,
            total = summary.total,
            male = summary.male_count,
            female = summary.female_count,
            visitors = summary.visitor_count,
            "分队摘要"
        );
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
