//! 下单页面上用到的选择器

/// 首次打开和每次"再下一单"后弹出的提示框按钮文本
pub const MODAL_BUTTON_TAG: &str = "button";
pub const MODAL_BUTTON_TEXT: &str = "OK";

/// 头部下拉框
pub const HEAD_SELECT: &str = "#head";
/// 腿部数量输入框
pub const LEGS_INPUT: &str = "input[type='number']";
/// 地址输入框
pub const ADDRESS_INPUT: &str = "#address";
/// 预览按钮
pub const PREVIEW_BUTTON: &str = "#preview";
/// 下单按钮
pub const ORDER_BUTTON: &str = "#order";
/// 提交失败时出现的错误提示
pub const ERROR_ALERT: &str = "div.alert.alert-danger";
/// 提交成功后的订单号徽章
pub const SUCCESS_BADGE: &str = "p.badge.badge-success";
/// 回执容器
pub const RECEIPT: &str = "#receipt";
/// 机器人预览图
pub const ROBOT_PREVIEW: &str = "#robot-preview-image";
/// 再下一单按钮
pub const ORDER_ANOTHER_BUTTON: &str = "#order-another";

/// 身体型号单选框
pub fn body_radio(body: &str) -> String {
    format!("input[type='radio'][value='{}']", body.replace('\'', "\\'"))
}
