//! Clue text for placed words.
//!
//! The formatter only needs a [`ClueLookup`]. Where the text comes from
//! (a remote generator, a dictionary file, the built-in table) is up to
//! the caller; a word nobody knows gets [`Clue::placeholder`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A bilingual clue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub en: String,
    pub zh: String,
}

impl Clue {
    pub fn new(en: impl Into<String>, zh: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            zh: zh.into(),
        }
    }

    /// Visible stand-in used when no source has a clue for `word`.
    pub fn placeholder(word: &str) -> Self {
        let upper = word.to_ascii_uppercase();
        Self {
            en: format!("Word: {}", upper),
            zh: format!("单词：{}", upper),
        }
    }
}

/// Maps a word to its clue, if known
pub trait ClueLookup {
    fn lookup(&self, word: &str) -> Option<Clue>;
}

impl<T: ClueLookup + ?Sized> ClueLookup for &T {
    fn lookup(&self, word: &str) -> Option<Clue> {
        (**self).lookup(word)
    }
}

/// Look `word` up, falling back to the placeholder.
pub fn resolve(lookup: &dyn ClueLookup, word: &str) -> Clue {
    lookup
        .lookup(word)
        .unwrap_or_else(|| Clue::placeholder(word))
}

/// Clues keyed by lowercase word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClueMap {
    entries: HashMap<String, Clue>,
}

impl ClueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled dictionary of common words
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .map(|&(word, en, zh)| (word.to_string(), Clue::new(en, zh)))
            .collect()
    }

    /// Parse a JSON object of the form `{"word": {"en": .., "zh": ..}}`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let raw: HashMap<String, Clue> = serde_json::from_str(json)?;
        Ok(raw.into_iter().collect())
    }

    pub fn insert(&mut self, word: &str, clue: Clue) {
        self.entries.insert(word.to_ascii_lowercase(), clue);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(&word.to_ascii_lowercase())
    }

    /// Add entries from `other`, keeping existing ones on conflict.
    pub fn merge(&mut self, other: ClueMap) {
        for (word, clue) in other.entries {
            self.entries.entry(word).or_insert(clue);
        }
    }

    /// For each of `words` without an entry, take one from `fallback`.
    /// Returns how many were filled.
    pub fn fill_missing<S: AsRef<str>>(&mut self, words: &[S], fallback: &dyn ClueLookup) -> usize {
        let mut filled = 0;
        for word in words {
            let word = word.as_ref();
            if self.contains(word) {
                continue;
            }
            if let Some(clue) = fallback.lookup(word) {
                self.insert(word, clue);
                filled += 1;
            }
        }
        filled
    }
}

impl FromIterator<(String, Clue)> for ClueMap {
    fn from_iter<I: IntoIterator<Item = (String, Clue)>>(iter: I) -> Self {
        let mut map = ClueMap::new();
        for (word, clue) in iter {
            map.insert(&word, clue);
        }
        map
    }
}

impl ClueLookup for ClueMap {
    fn lookup(&self, word: &str) -> Option<Clue> {
        self.entries.get(&word.to_ascii_lowercase()).cloned()
    }
}

const BUILTIN: &[(&str, &str, &str)] = &[
    ("cat", "Furry pet that purrs", "会呼噜叫的毛茸茸宠物"),
    ("dog", "Pet that barks", "会汪汪叫的宠物"),
    ("bat", "Flying mammal", "会飞的哺乳动物"),
    ("rat", "Rodent with long tail", "长尾巴的啮齿动物"),
    ("ant", "Tiny insect worker", "小昆虫工作者"),
    ("cow", "Farm animal that moos", "哞哞叫的农场动物"),
    ("owl", "Night bird", "夜间活动的鸟"),
    ("pig", "Pink farm animal", "粉色农场动物"),
    ("bee", "Makes honey", "制造蜂蜜"),
    ("fly", "Buzzing insect", "嗡嗡叫的昆虫"),
    ("sun", "Star in our sky", "我们天空中的星"),
    ("sky", "Above the earth", "地球上方"),
    ("sea", "Salty water body", "咸水水域"),
    ("run", "Move fast on foot", "用脚快速移动"),
    ("eat", "Consume food", "吃食物"),
    ("bed", "Where you sleep", "睡觉的地方"),
    ("car", "Road vehicle", "公路车辆"),
    ("key", "Opens a lock", "开锁用的"),
    ("box", "Container with lid", "有盖的容器"),
    ("hat", "Head covering", "头上戴的"),
    ("map", "Shows directions", "显示方向"),
    ("cup", "Drinking vessel", "杯子"),
    ("pen", "Writing tool", "写字工具"),
    ("egg", "Breakfast food", "早餐食物"),
    ("tea", "Hot leaf drink", "热茶"),
    ("ice", "Frozen water", "冰"),
    ("hot", "High temperature", "热的"),
    ("red", "Color of blood", "血的颜色"),
    ("big", "Large size", "大的"),
    ("new", "Not old", "新的"),
    ("old", "Not new", "旧的"),
    ("day", "24 hours", "一天"),
    ("job", "Work you do", "你做的工作"),
    ("fun", "Enjoyable", "有趣的"),
    ("top", "Highest point", "最高点"),
    ("end", "Final part", "最后部分"),
    ("arm", "Body limb", "身体肢体"),
    ("leg", "Walking limb", "走路的肢体"),
    ("ear", "Hearing organ", "听觉器官"),
    ("eye", "Seeing organ", "视觉器官"),
    ("book", "Reading material", "阅读材料"),
    ("door", "Room entrance", "房间入口"),
    ("tree", "Tall plant with trunk", "有树干的高大植物"),
    ("bird", "Feathered flyer", "有羽毛的飞行者"),
    ("fish", "Swims in water", "在水中游泳"),
    ("lion", "King of jungle", "丛林之王"),
    ("bear", "Large furry mammal", "大型毛茸茸的哺乳动物"),
    ("duck", "Quacking bird", "嘎嘎叫的鸟"),
    ("food", "What you eat", "吃的东西"),
    ("milk", "White drink from cows", "牛的白色饮料"),
    ("rice", "Asian grain staple", "亚洲主食谷物"),
    ("cake", "Birthday dessert", "生日甜点"),
    ("work", "Job; labor", "工作"),
    ("play", "Have fun", "玩耍"),
    ("read", "Look at words", "看文字"),
    ("walk", "Move on foot", "步行"),
    ("rain", "Water from clouds", "云里来的水"),
    ("snow", "White frozen flakes", "白色雪花"),
    ("wind", "Moving air", "移动的空气"),
    ("moon", "Night sky circle", "夜空中的圆"),
    ("lake", "Fresh water body", "淡水湖"),
    ("hill", "Small mountain", "小山"),
    ("rock", "Hard stone", "硬石头"),
    ("wave", "Ocean movement", "海浪"),
    ("fast", "Quick", "快的"),
    ("slow", "Not fast", "慢的"),
    ("soft", "Not hard", "软的"),
    ("hard", "Not soft", "硬的"),
    ("warm", "Comfortably hot", "温暖的"),
    ("cold", "Low temperature", "冷的"),
    ("blue", "Sky color", "天空的颜色"),
    ("game", "Fun activity", "游戏"),
    ("home", "Where you live", "你住的地方"),
    ("name", "What you are called", "你叫什么"),
    ("time", "Hours and minutes", "小时和分钟"),
    ("year", "365 days", "365天"),
    ("life", "Being alive", "活着"),
    ("love", "Deep affection", "深深的爱"),
    ("help", "Assist someone", "帮助某人"),
    ("water", "H2O liquid", "水"),
    ("earth", "Our planet", "我们的星球"),
    ("house", "Home building", "住宅建筑"),
    ("table", "Furniture for eating", "吃饭的家具"),
    ("chair", "Seat with back", "有靠背的座位"),
    ("glass", "Transparent material", "透明材料"),
    ("paper", "Writing surface", "书写表面"),
    ("horse", "Riding animal", "骑乘动物"),
    ("mouse", "Small rodent", "小老鼠"),
    ("tiger", "Striped big cat", "条纹大猫"),
    ("snake", "Slithering reptile", "蛇"),
    ("bread", "Baked from flour", "面粉烤的"),
    ("fruit", "Sweet plant food", "甜的植物食物"),
    ("clock", "Shows the time", "显示时间"),
    ("phone", "Call device", "电话"),
    ("cloud", "Sky cotton", "天上的棉花"),
    ("river", "Flowing water", "流动的水"),
    ("ocean", "Vast sea", "广阔的海"),
    ("beach", "Sandy shore", "沙滩"),
    ("grass", "Green ground cover", "绿色草地"),
    ("light", "Not dark", "光明"),
    ("night", "Dark time", "黑暗时间"),
    ("sleep", "Rest at night", "夜间休息"),
    ("dream", "Sleep vision", "梦"),
    ("think", "Use your brain", "用脑子想"),
    ("learn", "Gain knowledge", "学习知识"),
    ("happy", "Feeling joy", "快乐的"),
    ("funny", "Makes you laugh", "好笑的"),
    ("sweet", "Like sugar", "甜的"),
    ("music", "Sounds with rhythm", "有节奏的声音"),
    ("movie", "Film to watch", "看的电影"),
    ("story", "Tale to tell", "讲的故事"),
    ("world", "All of Earth", "整个地球"),
    ("money", "Used to buy things", "用来买东西"),
    ("child", "Young person", "小孩"),
    ("woman", "Adult female", "成年女性"),
    ("animal", "Living creature", "生物"),
    ("flower", "Plant bloom", "植物花朵"),
    ("garden", "Plant growing area", "种植区"),
    ("window", "Glass wall opening", "玻璃墙开口"),
    ("rabbit", "Hopping pet", "跳跃的宠物"),
    ("monkey", "Tree-swinging animal", "荡秋千的动物"),
    ("turtle", "Shelled reptile", "有壳爬行动物"),
    ("spider", "Eight-legged crawler", "八脚爬虫"),
    ("banana", "Yellow fruit", "黄色水果"),
    ("orange", "Citrus fruit", "柑橘水果"),
    ("cheese", "Dairy product", "奶制品"),
    ("butter", "Bread spread", "黄油"),
    ("dinner", "Evening meal", "晚餐"),
    ("coffee", "Morning drink", "早晨饮料"),
    ("forest", "Many trees together", "很多树在一起"),
    ("desert", "Sandy dry land", "沙漠"),
    ("winter", "Cold season", "冷的季节"),
    ("summer", "Hot season", "热的季节"),
    ("spring", "Flower season", "花开的季节"),
    ("doctor", "Heals sick people", "治病的人"),
    ("friend", "Person you like", "你喜欢的人"),
    ("family", "Related people", "有亲戚关系的人"),
    ("sister", "Female sibling", "姐妹"),
    ("mother", "Female parent", "妈妈"),
    ("father", "Male parent", "爸爸"),
    ("school", "Place to learn", "学习的地方"),
    ("number", "1, 2, 3, etc.", "数字"),
    ("letter", "A, B, C, etc.", "字母"),
    ("yellow", "Sun color", "太阳的颜色"),
    ("purple", "Royal color", "皇室的颜色"),
    ("kitchen", "Cooking room", "做饭的房间"),
    ("bedroom", "Sleeping room", "睡觉的房间"),
    ("teacher", "School instructor", "学校老师"),
    ("student", "Person learning", "学习的人"),
    ("brother", "Male sibling", "兄弟"),
    ("weather", "Rain or shine", "天气"),
    ("morning", "Start of day", "一天的开始"),
    ("evening", "End of day", "一天的结束"),
    ("rainbow", "Colorful sky arc", "彩虹"),
    ("dolphin", "Smart sea mammal", "聪明的海洋哺乳动物"),
    ("penguin", "Tuxedo bird", "穿燕尾服的鸟"),
    ("giraffe", "Long-necked animal", "长脖子动物"),
    ("chicken", "Farm bird", "农场鸟"),
    ("picture", "Image or photo", "图片或照片"),
    ("elephant", "Large trunk animal", "有长鼻子的大动物"),
    ("computer", "Digital machine", "数字机器"),
    ("internet", "World wide web", "互联网"),
    ("mountain", "Very tall hill", "很高的山"),
    ("building", "Large structure", "大型建筑"),
    ("airplane", "Flying vehicle", "飞机"),
    ("sunshine", "Light from sun", "阳光"),
    ("homework", "School assignment", "家庭作业"),
    ("sandwich", "Bread with filling", "三明治"),
    ("bathroom", "Washing room", "浴室"),
    ("umbrella", "Rain protection", "雨伞"),
    ("keyboard", "Typing tool", "键盘"),
    ("football", "Team ball sport", "足球"),
    ("baseball", "Bat and ball game", "棒球"),
    ("tomorrow", "Day after today", "明天"),
    ("everyone", "All people", "每个人"),
    ("question", "Asking something", "问题"),
    ("together", "With each other", "一起"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let clue = Clue::placeholder("zebra");
        assert_eq!(clue.en, "Word: ZEBRA");
        assert_eq!(clue.zh, "单词：ZEBRA");
    }

    #[test]
    fn test_builtin_lookup_ignores_case() {
        let map = ClueMap::builtin();
        assert!(map.len() > 150);
        assert_eq!(map.lookup("CAT").unwrap().en, "Furry pet that purrs");
        assert_eq!(map.lookup("cat"), map.lookup("Cat"));
        assert!(map.lookup("xylophone").is_none());
    }

    #[test]
    fn test_resolve_falls_back_to_placeholder() {
        let map = ClueMap::new();
        assert_eq!(resolve(&map, "qqq"), Clue::placeholder("qqq"));
    }

    #[test]
    fn test_from_json() {
        let map = ClueMap::from_json(r#"{"Owl": {"en": "Night bird", "zh": "猫头鹰"}}"#).unwrap();
        assert_eq!(map.lookup("owl"), Some(Clue::new("Night bird", "猫头鹰")));
        assert!(ClueMap::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_fill_missing_keeps_existing() {
        let mut map = ClueMap::new();
        map.insert("cat", Clue::new("Lion's cousin", "狮子的表亲"));

        let filled = map.fill_missing(&["cat", "dog", "qqq"], &ClueMap::builtin());
        assert_eq!(filled, 1);
        assert_eq!(map.lookup("cat").unwrap().en, "Lion's cousin");
        assert_eq!(map.lookup("dog").unwrap().en, "Pet that barks");
        assert!(map.lookup("qqq").is_none());
    }

    #[test]
    fn test_merge_prefers_existing() {
        let mut map = ClueMap::new();
        map.insert("sun", Clue::new("Daystar", "太阳"));
        map.merge(ClueMap::builtin());
        assert_eq!(map.lookup("sun").unwrap().en, "Daystar");
        assert!(map.contains("moon"));
    }
}
