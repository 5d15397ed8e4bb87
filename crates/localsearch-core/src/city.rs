//! City catalogue shared by the three search forms.
//!
//! The forms use lowercase pinyin codes; the backend indexes merchants by
//! the Chinese city name.

pub struct City {
    pub code: &'static str,
    pub display_name: &'static str,
    /// Well-known spots used as location hints
    pub example_locations: &'static [&'static str],
}

pub const CITIES: &[City] = &[
    City {
        code: "shanghai",
        display_name: "上海",
        example_locations: &["外滩", "陆家嘴", "徐家汇", "静安寺", "黄浦区"],
    },
    City {
        code: "beijing",
        display_name: "北京",
        example_locations: &["五道口", "三里屯", "国贸", "王府井", "海淀区"],
    },
    City {
        code: "guangzhou",
        display_name: "广州",
        example_locations: &["广州塔", "天河区", "珠江新城", "北京路", "上下九"],
    },
    City {
        code: "shenzhen",
        display_name: "深圳",
        example_locations: &["深圳湾公园", "南山区", "福田区", "罗湖区", "宝安区"],
    },
    City {
        code: "hangzhou",
        display_name: "杭州",
        example_locations: &["钱江世纪城", "西湖区", "滨江区", "拱墅区", "江干区"],
    },
    City {
        code: "suzhou",
        display_name: "苏州",
        example_locations: &["东方之门", "姑苏区", "工业园区", "吴中区", "相城区"],
    },
    City {
        code: "chengdu",
        display_name: "成都",
        example_locations: &["春熙路", "宽窄巷子", "锦里", "太古里", "锦江区"],
    },
    City {
        code: "chongqing",
        display_name: "重庆",
        example_locations: &["解放碑", "观音桥", "南坪", "沙坪坝"],
    },
    City {
        code: "wuhan",
        display_name: "武汉",
        example_locations: &["武昌站", "汉口站", "光谷", "江汉路"],
    },
];

/// Hint shown when no city is selected yet
pub const FALLBACK_LOCATIONS: &[&str] = &["外滩", "五道口", "天河区"];

pub fn find(code: &str) -> Option<&'static City> {
    CITIES.iter().find(|c| c.code == code)
}

/// Backend city name for a form code; unknown codes pass through unchanged
pub fn display_name(code: &str) -> &str {
    find(code).map(|c| c.display_name).unwrap_or(code)
}

/// Placeholder text for the location input, e.g. `e.g., 外滩, 陆家嘴, ...`
pub fn location_hint(code: &str) -> String {
    let examples = find(code)
        .map(|c| c.example_locations)
        .unwrap_or(FALLBACK_LOCATIONS);
    format!("e.g., {}", examples.join(", "))
}

/// Canned queries offered by the playground
pub struct ExampleQuery {
    pub city: &'static str,
    pub location: &'static str,
    pub query: &'static str,
}

pub const EXAMPLE_QUERIES: &[ExampleQuery] = &[
    ExampleQuery { city: "shanghai", location: "外滩", query: "餐厅" },
    ExampleQuery { city: "beijing", location: "五道口", query: "火锅店" },
    ExampleQuery { city: "shenzhen", location: "南山区", query: "电影院" },
    ExampleQuery { city: "guangzhou", location: "天河区", query: "生日蛋糕" },
    ExampleQuery { city: "chengdu", location: "春熙路", query: "咖啡店" },
    ExampleQuery { city: "wuhan", location: "武昌站", query: "酒店" },
];
