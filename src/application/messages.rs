//! Texts returned to the admin front end. The front end displays them
//! verbatim, so they stay in the site's language.

pub const KEYWORD_REQUIRED: &str = "请输入搜素内容！";
pub const USER_TYPE_INVALID: &str = "用户类型错误！";

pub const RECOMMEND_FULL: &str = "推荐景点已满！";
pub const RECOMMEND_EMPTY: &str = "推荐景点不足！";
pub const SCENIC_ID_REQUIRED: &str = "请填写景点id";
pub const SCENIC_NOT_FOUND: &str = "景点不存在！";

pub const SCENIC_NAME_REQUIRED: &str = "请填写景点名称！";
pub const IMAGE_REQUIRED: &str = "请上传图片！";
pub const IMAGE_FORMAT_INVALID: &str = "图片格式错误！";

pub const NO_SCENIC_SELECTED: &str = "未选择景点！";
pub const SCENIC_ID_INVALID: &str = "景点id格式错误！";
pub const SCENIC_REMOVED: &str = "景点删除成功！";

pub const AUDIT_INVALID: &str = "审核状态错误！";
pub const ORDER_NOT_FOUND: &str = "订单不存在！";

pub const USERNAME_TAKEN: &str = "该用户名已存在！";
pub const EMAIL_TAKEN: &str = "该邮箱已被使用！";
pub const USER_FIELDS_REQUIRED: &str = "请填写完整信息！";
pub const USER_ADDED: &str = "用户添加成功！";

pub const NO_USER_SELECTED: &str = "未选择用户！";
pub const PARAMS_INVALID: &str = "参数格式错误！";
pub const USER_REMOVED: &str = "用户删除成功！";
pub const OPERATION_DONE: &str = "操作成功！";

pub const PASSWORD_MISMATCH: &str = "两次密码不相同";
pub const PASSWORD_REQUIRED: &str = "密码不能为空";
