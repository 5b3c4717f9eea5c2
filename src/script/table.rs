/*!
 * Bundled simplified to traditional character table.
 *
 * One-to-one pairs only. Characters whose traditional form depends on the
 * surrounding word (后, 发, 几, 钟, 干, 面, 复, 里, 台, ...) are absent and
 * pass through unchanged. No traditional form appears as a simplified key, which
 * keeps conversion idempotent.
 */

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

// @const: (simplified, traditional) pairs
pub(crate) static PAIRS: &[(char, char)] = &[
    ('这', '這'), ('简', '簡'), ('体', '體'), ('们', '們'), ('气', '氣'), ('观', '觀'), ('说', '說'), ('话', '話'),
    ('语', '語'), ('时', '時'), ('间', '間'), ('个', '個'), ('为', '為'), ('会', '會'), ('来', '來'), ('对', '對'),
    ('还', '還'), ('没', '沒'), ('国', '國'), ('过', '過'), ('见', '見'), ('现', '現'), ('开', '開'), ('关', '關'),
    ('门', '門'), ('问', '問'), ('题', '題'), ('学', '學'), ('习', '習'), ('书', '書'), ('车', '車'), ('东', '東'),
    ('长', '長'), ('马', '馬'), ('鸟', '鳥'), ('鱼', '魚'), ('龙', '龍'), ('风', '風'), ('飞', '飛'),
    ('电', '電'), ('视', '視'), ('听', '聽'), ('写', '寫'), ('读', '讀'), ('买', '買'), ('卖', '賣'), ('钱', '錢'),
    ('银', '銀'), ('铁', '鐵'), ('爱', '愛'), ('边', '邊'), ('变', '變'), ('标', '標'),
    ('宾', '賓'), ('补', '補'), ('币', '幣'), ('仓', '倉'), ('产', '產'), ('场', '場'),
    ('厂', '廠'), ('彻', '徹'), ('尘', '塵'), ('衬', '襯'), ('称', '稱'), ('惩', '懲'), ('诚', '誠'), ('齿', '齒'),
    ('虫', '蟲'), ('处', '處'), ('础', '礎'), ('传', '傳'), ('疮', '瘡'), ('闯', '闖'), ('创', '創'), ('纯', '純'),
    ('词', '詞'), ('从', '從'), ('聪', '聰'), ('丛', '叢'), ('窜', '竄'), ('错', '錯'), ('达', '達'), ('带', '帶'),
    ('贷', '貸'), ('单', '單'), ('担', '擔'), ('胆', '膽'), ('导', '導'), ('灯', '燈'), ('邓', '鄧'), ('敌', '敵'),
    ('递', '遞'), ('点', '點'), ('垫', '墊'), ('钓', '釣'), ('调', '調'), ('叠', '疊'), ('顶', '頂'), ('订', '訂'),
    ('动', '動'), ('冻', '凍'), ('独', '獨'), ('断', '斷'), ('队', '隊'), ('吨', '噸'), ('夺', '奪'), ('堕', '墮'),
    ('儿', '兒'), ('尔', '爾'), ('罚', '罰'), ('阀', '閥'), ('饭', '飯'), ('访', '訪'),
    ('纺', '紡'), ('废', '廢'), ('费', '費'), ('坟', '墳'), ('奋', '奮'), ('粪', '糞'), ('凤', '鳳'),
    ('妇', '婦'), ('负', '負'), ('该', '該'), ('盖', '蓋'), ('赶', '趕'), ('钢', '鋼'), ('纲', '綱'), ('岗', '崗'),
    ('搁', '擱'), ('鸽', '鴿'), ('阁', '閣'), ('给', '給'), ('贡', '貢'), ('沟', '溝'), ('购', '購'), ('构', '構'),
    ('够', '夠'), ('顾', '顧'), ('挂', '掛'), ('馆', '館'), ('贯', '貫'), ('惯', '慣'), ('广', '廣'), ('归', '歸'),
    ('规', '規'), ('贵', '貴'), ('锅', '鍋'), ('汉', '漢'), ('轰', '轟'),
    ('护', '護'), ('华', '華'), ('画', '畫'), ('怀', '懷'), ('坏', '壞'), ('欢', '歡'), ('环', '環'), ('换', '換'),
    ('唤', '喚'), ('黄', '黃'), ('挥', '揮'), ('辉', '輝'), ('绘', '繪'), ('毁', '毀'), ('荤', '葷'),
    ('浑', '渾'), ('货', '貨'), ('祸', '禍'), ('击', '擊'), ('机', '機'), ('积', '積'),
    ('鸡', '雞'), ('极', '極'), ('级', '級'), ('挤', '擠'), ('际', '際'), ('继', '繼'), ('纪', '紀'),
    ('驾', '駕'), ('坚', '堅'), ('监', '監'), ('减', '減'), ('检', '檢'), ('键', '鍵'), ('渐', '漸'),
    ('践', '踐'), ('将', '將'), ('讲', '講'), ('奖', '獎'), ('浇', '澆'), ('骄', '驕'), ('胶', '膠'),
    ('脚', '腳'), ('较', '較'), ('阶', '階'), ('节', '節'), ('洁', '潔'), ('结', '結'), ('紧', '緊'),
    ('仅', '僅'), ('进', '進'), ('劲', '勁'), ('经', '經'), ('惊', '驚'), ('颈', '頸'), ('静', '靜'),
    ('镜', '鏡'), ('旧', '舊'), ('举', '舉'), ('剧', '劇'), ('惧', '懼'), ('觉', '覺'), ('决', '決'),
    ('绝', '絕'), ('军', '軍'), ('凯', '凱'), ('颗', '顆'), ('课', '課'), ('垦', '墾'), ('恳', '懇'), ('库', '庫'),
    ('块', '塊'), ('宽', '寬'), ('矿', '礦'), ('亏', '虧'), ('扩', '擴'), ('阔', '闊'),
    ('赖', '賴'), ('兰', '蘭'), ('拦', '攔'), ('栏', '欄'), ('蓝', '藍'), ('篮', '籃'), ('览', '覽'),
    ('懒', '懶'), ('烂', '爛'), ('滥', '濫'), ('劳', '勞'), ('乐', '樂'), ('类', '類'), ('泪', '淚'), ('离', '離'),
    ('礼', '禮'), ('丽', '麗'), ('厉', '厲'), ('励', '勵'), ('连', '連'), ('联', '聯'), ('恋', '戀'),
    ('练', '練'), ('粮', '糧'), ('两', '兩'), ('辆', '輛'), ('谅', '諒'), ('疗', '療'), ('辽', '遼'),
    ('猎', '獵'), ('临', '臨'), ('邻', '鄰'), ('灵', '靈'), ('岭', '嶺'), ('领', '領'), ('刘', '劉'), ('楼', '樓'),
    ('卢', '盧'), ('芦', '蘆'), ('炉', '爐'), ('陆', '陸'), ('录', '錄'), ('虑', '慮'), ('乱', '亂'), ('论', '論'),
    ('罗', '羅'), ('萝', '蘿'), ('逻', '邏'), ('骡', '騾'), ('络', '絡'), ('驴', '驢'), ('吕', '呂'), ('铝', '鋁'),
    ('绿', '綠'), ('妈', '媽'), ('玛', '瑪'), ('码', '碼'), ('蚂', '螞'), ('骂', '罵'), ('吗', '嗎'), ('麦', '麥'),
    ('迈', '邁'), ('脉', '脈'), ('满', '滿'), ('猫', '貓'), ('贸', '貿'), ('梦', '夢'),
    ('觅', '覓'), ('绵', '綿'), ('庙', '廟'), ('灭', '滅'), ('亩', '畝'), ('闹', '鬧'), ('恼', '惱'), ('脑', '腦'),
    ('内', '內'), ('拟', '擬'), ('农', '農'), ('浓', '濃'), ('诺', '諾'), ('欧', '歐'), ('盘', '盤'),
    ('赔', '賠'), ('喷', '噴'), ('鹏', '鵬'), ('骗', '騙'), ('飘', '飄'), ('频', '頻'), ('贫', '貧'),
    ('凭', '憑'), ('评', '評'), ('泼', '潑'), ('铺', '鋪'), ('谱', '譜'), ('齐', '齊'), ('骑', '騎'), ('岂', '豈'),
    ('启', '啟'), ('弃', '棄'), ('迁', '遷'), ('铅', '鉛'), ('浅', '淺'), ('枪', '槍'), ('墙', '牆'),
    ('抢', '搶'), ('桥', '橋'), ('乔', '喬'), ('侨', '僑'), ('窍', '竅'), ('亲', '親'), ('轻', '輕'), ('庆', '慶'),
    ('穷', '窮'), ('区', '區'), ('驱', '驅'), ('权', '權'), ('劝', '勸'), ('确', '確'), ('让', '讓'), ('饶', '饒'),
    ('扰', '擾'), ('热', '熱'), ('认', '認'), ('荣', '榮'), ('软', '軟'), ('润', '潤'), ('洒', '灑'), ('伞', '傘'),
    ('丧', '喪'), ('扫', '掃'), ('涩', '澀'), ('杀', '殺'), ('纱', '紗'), ('晒', '曬'), ('伤', '傷'), ('赏', '賞'),
    ('烧', '燒'), ('绍', '紹'), ('赊', '賒'), ('设', '設'), ('摄', '攝'), ('绅', '紳'), ('审', '審'), ('婶', '嬸'),
    ('肾', '腎'), ('渗', '滲'), ('声', '聲'), ('绳', '繩'), ('圣', '聖'), ('师', '師'), ('诗', '詩'),
    ('狮', '獅'), ('湿', '濕'), ('识', '識'), ('实', '實'), ('势', '勢'), ('试', '試'), ('饰', '飾'), ('释', '釋'),
    ('寿', '壽'), ('兽', '獸'), ('属', '屬'), ('树', '樹'), ('帅', '帥'), ('双', '雙'), ('谁', '誰'),
    ('税', '稅'), ('顺', '順'), ('硕', '碩'), ('丝', '絲'), ('饲', '飼'), ('颂', '頌'), ('诉', '訴'), ('肃', '肅'),
    ('虽', '雖'), ('随', '隨'), ('岁', '歲'), ('孙', '孫'), ('损', '損'), ('笋', '筍'), ('缩', '縮'), ('锁', '鎖'),
    ('态', '態'), ('摊', '攤'), ('滩', '灘'), ('谈', '談'), ('叹', '嘆'), ('汤', '湯'), ('烫', '燙'), ('涛', '濤'),
    ('讨', '討'), ('腾', '騰'), ('条', '條'), ('厅', '廳'), ('头', '頭'), ('图', '圖'), ('椭', '橢'),
    ('袜', '襪'), ('弯', '彎'), ('湾', '灣'), ('万', '萬'), ('网', '網'), ('伟', '偉'), ('违', '違'), ('围', '圍'),
    ('卫', '衛'), ('纬', '緯'), ('稳', '穩'), ('窝', '窩'), ('务', '務'), ('雾', '霧'), ('误', '誤'), ('戏', '戲'),
    ('细', '細'), ('虾', '蝦'), ('峡', '峽'), ('狭', '狹'), ('吓', '嚇'), ('鲜', '鮮'), ('显', '顯'),
    ('险', '險'), ('县', '縣'), ('线', '線'), ('宪', '憲'), ('献', '獻'), ('乡', '鄉'), ('详', '詳'), ('响', '響'),
    ('项', '項'), ('协', '協'), ('胁', '脅'), ('谢', '謝'), ('兴', '興'), ('选', '選'), ('寻', '尋'), ('训', '訓'),
    ('讯', '訊'), ('压', '壓'), ('鸭', '鴨'), ('亚', '亞'), ('盐', '鹽'), ('严', '嚴'), ('颜', '顏'),
    ('验', '驗'), ('艳', '豔'), ('厌', '厭'), ('扬', '揚'), ('杨', '楊'), ('阳', '陽'), ('养', '養'), ('样', '樣'),
    ('爷', '爺'), ('页', '頁'), ('业', '業'), ('医', '醫'), ('仪', '儀'), ('遗', '遺'),
    ('忆', '憶'), ('艺', '藝'), ('亿', '億'), ('议', '議'), ('义', '義'), ('异', '異'), ('译', '譯'), ('阴', '陰'),
    ('饮', '飲'), ('隐', '隱'), ('应', '應'), ('营', '營'), ('赢', '贏'), ('拥', '擁'), ('优', '優'), ('忧', '憂'),
    ('邮', '郵'), ('犹', '猶'), ('与', '與'), ('预', '預'), ('狱', '獄'), ('誉', '譽'), ('园', '園'), ('员', '員'),
    ('圆', '圓'), ('远', '遠'), ('约', '約'), ('跃', '躍'), ('钥', '鑰'), ('阅', '閱'), ('运', '運'),
    ('杂', '雜'), ('灾', '災'), ('载', '載'), ('赃', '贓'), ('凿', '鑿'), ('枣', '棗'), ('责', '責'), ('则', '則'),
    ('泽', '澤'), ('贼', '賊'), ('赠', '贈'), ('闸', '閘'), ('诈', '詐'), ('斋', '齋'), ('债', '債'), ('战', '戰'),
    ('盏', '盞'), ('张', '張'), ('涨', '漲'), ('帐', '帳'), ('账', '賬'), ('胀', '脹'), ('赵', '趙'), ('针', '針'),
    ('侦', '偵'), ('诊', '診'), ('镇', '鎮'), ('阵', '陣'), ('争', '爭'), ('证', '證'), ('郑', '鄭'), ('织', '織'),
    ('职', '職'), ('执', '執'), ('纸', '紙'), ('质', '質'), ('终', '終'), ('众', '眾'), ('昼', '晝'),
    ('骤', '驟'), ('猪', '豬'), ('诸', '諸'), ('烛', '燭'), ('嘱', '囑'), ('贮', '貯'), ('驻', '駐'), ('专', '專'),
    ('砖', '磚'), ('转', '轉'), ('赚', '賺'), ('装', '裝'), ('妆', '妝'), ('壮', '壯'), ('状', '狀'),
    ('资', '資'), ('综', '綜'), ('总', '總'), ('纵', '縱'), ('邹', '鄒'), ('组', '組'),
    ('无', '無'), ('济', '濟'), ('报', '報'), ('闻', '聞'), ('温', '溫'),
    ('请', '請'), ('脸', '臉'), ('饿', '餓'), ('饱', '飽'), ('馒', '饅'), ('饺', '餃'), ('红', '紅'), ('难', '難'),
    ('计', '計'), ('备', '備'), ('统', '統'), ('数', '數'), ('赛', '賽'), ('败', '敗'), ('输', '輸'), ('记', '記'),
    ('户', '戶'), ('厨', '廚'), ('笔', '筆'), ('龟', '龜'), ('龄', '齡'), ('岛', '島'), ('缘', '緣'), ('续', '續'),
    ('绩', '績'), ('维', '維'), ('编', '編'), ('谓', '謂'), ('谜', '謎'), ('谣', '謠'), ('谦', '謙'), ('谨', '謹'),
    ('谋', '謀'), ('贝', '貝'), ('财', '財'), ('贩', '販'), ('轨', '軌'), ('轮', '輪'), ('辅', '輔'), ('辈', '輩'),
    ('辑', '輯'), ('闪', '閃'), ('闭', '閉'), ('闷', '悶'), ('顿', '頓'), ('颇', '頗'), ('额', '額'), ('铃', '鈴'),
    ('链', '鏈'), ('销', '銷'), ('锋', '鋒'), ('饼', '餅'), ('驰', '馳'), ('驶', '駛'), ('鸣', '鳴'), ('鹅', '鵝'),
    ('鲁', '魯'), ('鲸', '鯨'), ('宝', '寶'), ('层', '層'), ('帮', '幫'), ('弹', '彈'), ('强', '強'),
    ('悬', '懸'), ('愤', '憤'), ('抚', '撫'), ('择', '擇'), ('挡', '擋'), ('挣', '掙'), ('掷', '擲'),
    ('摇', '搖'), ('晓', '曉'), ('暂', '暫'), ('横', '橫'), ('残', '殘'), ('毕', '畢'), ('沪', '滬'),
    ('测', '測'), ('滚', '滾'), ('烦', '煩'), ('牵', '牽'), ('琐', '瑣'), ('畅', '暢'), ('祷', '禱'),
    ('窃', '竊'), ('竞', '競'), ('纠', '糾'), ('纳', '納'), ('绕', '繞'), ('缓', '緩'), ('肠', '腸'),
    ('肤', '膚'), ('舰', '艦'), ('莱', '萊'), ('袭', '襲'), ('许', '許'), ('贪', '貪'), ('贴', '貼'), ('趋', '趨'),
    ('迟', '遲'), ('酱', '醬'), ('陈', '陳'), ('韩', '韓'), ('伦', '倫'), ('伪', '偽'), ('侠', '俠'),
    ('侣', '侶'), ('侧', '側'), ('俭', '儉'), ('倾', '傾'), ('偿', '償'), ('储', '儲'), ('兑', '兌'),
    ('冈', '岡'), ('册', '冊'), ('冯', '馮'), ('净', '淨'), ('凉', '涼'), ('凑', '湊'), ('刚', '剛'),
    ('删', '刪'), ('刹', '剎'), ('剂', '劑'), ('剑', '劍'), ('办', '辦'), ('勋', '勳'), ('却', '卻'), ('厕', '廁'),
    ('厢', '廂'), ('厦', '廈'), ('叙', '敘'), ('吴', '吳'), ('呐', '吶'), ('呜', '嗚'), ('咏', '詠'), ('哑', '啞'),
    ('啰', '囉'), ('啸', '嘯'), ('坠', '墜'), ('垒', '壘'), ('壳', '殼'), ('娱', '娛'), ('娇', '嬌'),
    ('婴', '嬰'), ('宠', '寵'), ('寝', '寢'), ('尧', '堯'), ('屉', '屜'), ('届', '屆'), ('屿', '嶼'), ('岚', '嵐'),
    ('峦', '巒'), ('巩', '鞏'),
];

/// Simplified to traditional lookup, built once per process
pub(crate) static SIMPLIFIED_TO_TRADITIONAL: Lazy<HashMap<char, char>> =
    Lazy::new(|| PAIRS.iter().copied().collect());

/// Every traditional form the table can produce
pub(crate) static TRADITIONAL_FORMS: Lazy<HashSet<char>> =
    Lazy::new(|| PAIRS.iter().map(|&(_, traditional)| traditional).collect());
