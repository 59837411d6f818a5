use crate::errors::AppError;
use crate::models::QuestionRecord;
use crate::storage::Database;

/// Seed the fixed question pool on startup when the store has none. The pool
/// is never mutated at runtime; answers live only in the persisted document.
pub async fn ensure_questions(db: &Database) -> Result<(), AppError> {
    let seeded = db
        .update::<_, AppError, _>(|doc| {
            if !doc.questions.is_empty() {
                return Ok(false);
            }
            doc.questions = default_pool();
            Ok(true)
        })
        .await?;

    if seeded {
        tracing::info!("Seeded question pool with {} questions", POOL.len());
    }

    Ok(())
}

pub fn default_pool() -> Vec<QuestionRecord> {
    POOL.iter()
        .map(|(q, a)| QuestionRecord {
            prompt: (*q).to_string(),
            answer: (*a).to_string(),
        })
        .collect()
}

const POOL: &[(&str, &str)] = &[
    ("Thủ đô của Nhật Bản là thành phố nào?", "tokyo"),
    ("Tên của loài chim không biết bay, sống ở New Zealand, là gì?", "kiwi"),
    ("2 + 2 × 2 = ?", "6"),
    ("Quốc gia có diện tích lớn nhất thế giới?", "russia"),
    ("Ai viết “Truyện Kiều”?", "nguyễn du"),
    ("Màu nào nằm giữa cầu vồng?", "green"),
    ("Tên hành tinh được gọi là 'Hành tinh Đỏ'?", "mars"),
    ("Từ tiếng Anh 'apple' dịch ra tiếng Việt là?", "táo"),
    ("Tháng nào có 28 ngày?", "february"),
    ("Tên nhạc cụ có phím, tiếng đàn vang là?", "piano"),
    ("Hình có 4 cạnh bằng gọi là gì?", "square"),
    ("12 giờ sáng gọi là? (AM/PM trả lời)", "am"),
    ("Nước nào nổi tiếng với tháp Eiffel?", "france"),
    ("Cái gì lên nhưng không bao giờ xuống?", "age"),
    ("Biểu tượng '@' gọi là gì trong tiếng Việt?", "at"),
    ("Gì màu vàng, dài, ăn được, thường bóc vỏ?", "banana"),
    ("Tên vị lãnh tụ nước Mỹ nổi tiếng: Abraham ___?", "lincoln"),
    ("Con vật có vòi dài là?", "elephant"),
    ("Dấu '!' gọi là gì?", "exclamation"),
    ("Ai là tác giả 'Chiếc thuyền ngoài xa'?", "nguyễn minh châu"),
    ("Hình tròn có bán kính r, chu vi bằng bao nhiêu?", "2πr"),
    ("H2O là công thức của chất gì?", "water"),
    ("Biển lớn nhất Trái Đất là gì?", "pacific"),
    ("Tên mẹ của người con trai là 'con gái của bố' gọi là?", "sister"),
    ("Game 'Super Mario' do hãng nào phát triển?", "nintendo"),
    ("Ai vẽ bức 'Mona Lisa'?", "leonardo da vinci"),
    ("Quốc gia có hình dáng chiếc ủng nằm ở châu Âu?", "italy"),
    ("Tên chiếc xe hơi điện của Tesla là?", "model 3"),
    ("Trong tiếng Anh 'thank you' tương đương với?", "thank you"),
    ("Thành phố nào gọi là 'Kinh đô ánh sáng'?", "paris"),
    ("Lịch nào có 7 ngày?", "gregorian"),
    ("WWW nghĩa là?", "world wide web"),
    ("Trong bộ bài, quân nào lớn nhất?", "ace"),
    ("Từ ghép 'máy + bay' = ?", "máy bay"),
    ("Quốc gia có biểu tượng cây lá phong?", "canada"),
    ("Số nguyên tố nhỏ nhất > 1 là?", "2"),
    ("Tên loài hoa quốc gia của Nhật Bản?", "cherry blossom"),
    ("HTTP viết tắt của?", "hypertext transfer protocol"),
    ("Tổng 50 + 25 = ?", "75"),
    ("Cái gì bạn càng lấy ra càng để lại nhiều?", "hole"),
    ("Quốc gia có nhiều đảo nhất thế giới?", "indonesia"),
    ("Loại ngôn ngữ lập trình phổ biến cho web frontend?", "javascript"),
    ("Bóng đá có bao nhiêu người trên sân cho mỗi đội?", "11"),
    ("Nước nào có thủ đô là Canberra?", "australia"),
    ("Ai là tác giả 'Dế Mèn phiêu lưu ký'?", "tô hoài"),
    ("Con người có bao nhiêu cặp nhiễm sắc thể?", "23"),
    ("1000 m = ? km", "1"),
    ("Trong toán, PI xấp xỉ bằng?", "3.14"),
    ("Biểu tượng của Apple là gì?", "apple"),
    ("Quốc gia có Tháp Pisa nghiêng?", "italy"),
    ("CPU là viết tắt của?", "central processing unit"),
    ("Ai đặt chân lên Mặt Trăng đầu tiên?", "neil armstrong"),
    ("Tên sông dài nhất châu Á?", "yangtze"),
    ("Từ tiếng Việt 'bánh mì' trong tiếng Anh là?", "bread"),
    ("Sắp xếp 3,1,4 để thành số lớn nhất", "431"),
    ("Viết tắt của 'Artificial Intelligence' là?", "ai"),
    ("Năm kết thúc Thế chiến II là?", "1945"),
    ("Tên hoa đặc trưng Tết Việt Nam?", "hoa mai"),
    ("Thứ tự các hành tinh từ gần Mặt Trời nhất?", "mercury, venus, earth"),
    ("Kể tên một loại quả có múi?", "orange"),
    ("Tên nhà văn dùng bút danh 'Nam Cao'?", "trung viên"),
    ("Tên hệ điều hành mã nguồn mở phổ biến?", "linux"),
    ("Số Fibonacci tiếp theo sau 8 là?", "13"),
    ("Thủ đô nước Hàn Quốc là?", "seoul"),
    ("Một màu trung tính thường dùng trong thiết kế tối?", "gray"),
    ("Con vật biểu tượng của nước Anh là?", "lion"),
    ("Tên môn thể thao có lưới trên sân và quả shuttlecock?", "badminton"),
    ("JSON là định dạng dùng để truyền gì?", "data"),
    ("Biển nào tách châu Âu và châu Á?", "black sea"),
    ("Tính: 15% của 200 = ?", "30"),
    ("Vật thể quanh Trái Đất phản chiếu ánh sáng ban đêm?", "moon"),
    ("Kể tên một loại nhạc cụ dây.", "guitar"),
    ("Tên sách thiếu nhi nổi tiếng của Roald Dahl?", "charlie and the chocolate factory"),
    ("Thành phố nổi tiếng với kênh đào, gondola?", "venice"),
    ("Ai phát minh ra bóng đèn (tên thường nhắc đến)?", "thomas edison"),
    ("Trong toán, 0 chia cho 5 = ?", "0"),
    ("Tên một loài động vật ăn cỏ sống trên đồng cỏ?", "cow"),
    ("Chữ cái đầu của 'Vietnam' là?", "v"),
    ("Tên một phim hoạt hình nổi tiếng của Pixar?", "toy story"),
    ("Số mặt của hình lập phương là bao nhiêu?", "6"),
    ("Tên một loại hạt dùng làm sữa thực vật?", "almond"),
    ("Tượng Nữ Thần Tự Do nằm ở đâu?", "new york"),
    ("Ai là người sáng lập Microsoft?", "bill gates"),
    ("Tên một loại ngũ cốc?", "oats"),
    ("Một từ đồng nghĩa với 'nhanh'?", "fast"),
    ("Phương tiện giao thông công cộng chạy trên ray?", "train"),
    ("Số nguyên lớn tiếp theo sau 99?", "100"),
    ("Kỹ năng mềm quan trọng khi làm việc nhóm?", "communication"),
    ("Tên một công cụ quản lý mã nguồn (VCS)?", "git"),
    ("Viết 1 câu chúc ngắn cho cộng đồng.", "Chúc cộng đồng luôn vui vẻ và sáng tạo!"),
];
