//! Code words for the built-in AprilTag families.
//!
//! One `u64` per marker id. Bit `y * dim + x` holds the data cell at column
//! `x`, row `y` of the unrotated marker; a set bit is a white cell.

#[rustfmt::skip]
pub(crate) const TAG36H11: [u64; 587] = [
    0x047b7310b, 0x9c712bec7, 0x1127334c1, 0xb3db82789,
    0xe495c72d1, 0xe169b7d93, 0x159a190a5, 0xda3830123,
    0xf1c8dce3d, 0x2ed68409c, 0x357ef0a86, 0xdafad93d8,
    0x578c43c14, 0xcf961b690, 0x884a6edf2, 0xc43c36636,
    0xa7e06756e, 0xfc40927ec, 0x7310cb972, 0x98ee86e5d,
    0x05dd5d489, 0x8f0355b05, 0xca5f7444f, 0xbaaf19871,
    0x2619d07b5, 0xa91fed663, 0x17b9a5baf, 0x42b5e4e65,
    0x27f93ad96, 0xada726312, 0xff07d6180, 0x4edee1dc3,
    0x0a5047c3b, 0x7a222a935, 0x4992deb27, 0x9094865c6,
    0x0ccebe54a, 0x96caf7ad6, 0x6f8b31646, 0xa77b1d878,
    0xdcdbe966a, 0x8e6bd84c9, 0x6a656ed19, 0x75317b841,
    0x8ad3d20af, 0x6efdc697d, 0x2764204c8, 0x54c6d469a,
    0x434aa4d58, 0x23d80a0ae, 0x66b2b3f11, 0x361345923,
    0x324f256e9, 0xc22f49b77, 0x6c431a18a, 0xc3cb331dc,
    0xd6a66c801, 0x3fb4e94a1, 0xf0deae6cc, 0xe730ff394,
    0x8b9d69a64, 0x569b214e0, 0xce6139d2c, 0x2a8fad695,
    0x255bb81dd, 0xea799184b, 0xc7adc5a42, 0x6ebf426b2,
    0x2c2e1df27, 0x7a94674d6, 0xe2c67fc5a, 0x8e8afb7a0,
    0x539fbd093, 0x6463f9f4a, 0x4ea658ae4, 0x33ae84d91,
    0x18fc07131, 0x97320e9f5, 0xe3a892ae1, 0x7cd5bf7cb,
    0x587442472, 0x246ade605, 0xa257a38ec, 0x6d3a7e7f3,
    0x46629a346, 0x130977009, 0x1595ef46d, 0x97210847a,
    0x9445bc544, 0x9a9a4214e, 0x06a85ab82, 0x50d325136,
    0x3191b854b, 0xe99d9e27b, 0x0c7865ce8, 0x23d6fc226,
    0xa60e8a67f, 0x3ffd79140, 0x14a0cd49c, 0xeccc5b9ce,
    0xfbf04a804, 0x9d9ede53e, 0xd9af70d92, 0x47fd28256,
    0x9d03d4c68, 0x6145627b0, 0x5b9159c5b, 0x79b72a5cc,
    0xb7fe68517, 0x4456572e3, 0x63bf3b689, 0xac1d96e2d,
    0xc727f32ed, 0x4f76aee15, 0x9da52396c, 0x91c152579,
    0x2b04262bf, 0xed4fe13c0, 0x613db9a0e, 0xd2e47a43c,
    0x01781c64b, 0x142adbdbb, 0xf37b5c12b, 0xee403835d,
    0x5d98fbc88, 0x1d0da4305, 0xde48a88a4, 0x7564d34f9,
    0x30635d4ae, 0x2b20a2d24, 0x00cb483fb, 0x9bc24485b,
    0xbe2369b40, 0x74692e968, 0x037b56566, 0x5b8c6227d,
    0xed14d250f, 0xf94037653, 0x3d5238a15, 0x6b3de54cd,
    0xb85c87f63, 0x7bccc6fb4, 0x0efcb9937, 0x8b31e0355,
    0x04c7c5d2d, 0xc0ea56969, 0x6f8ab889b, 0xf74ce174f,
    0x156534a28, 0x555b94170, 0x35aebd0e2, 0x1591748b4,
    0x75a45d10e, 0xbaa674068, 0x290f9ce82, 0x23f3e58eb,
    0x939610d7c, 0xc56778e34, 0xbd52f7812, 0xc20cb3a8c,
    0x6b79b463f, 0xf8164cf13, 0x03b3ecd36, 0x58131bfa4,
    0x0d1f2c5a6, 0xa69a36917, 0x2a081d1c8, 0xc97a8b458,
    0xd91fe0f7e, 0x07ee46459, 0xaa3b16202, 0x6d54ec04b,
    0x4dd668c0c, 0x0990fdb78, 0x407350fb7, 0x76841b2f5,
    0xa5966113d, 0x311f9f7bc, 0x18b235e3d, 0x9da814a4a,
    0x0a80f6712, 0xf1e8e2b1b, 0xf24688bba, 0x4329de25f,
    0xa8b28e75b, 0x314aa7a8a, 0xaf3286b2c, 0x0e581cf74,
    0xd9f692d23, 0x7576055a7, 0xd6916c6b2, 0x085154902,
    0x7798c0ede, 0xbba9c442d, 0xc7b789b09, 0xd7f4af4d1,
    0x1b3e488e9, 0x2a325cc30, 0x4adb9ac72, 0x1cfe1167a,
    0x96ff002ed, 0xdb1987694, 0x46fa0bbe8, 0xc8d02afca,
    0x131bd2a9d, 0x96f9dda08, 0xa85c4524d, 0xc7271e03e,
    0x2c407550f, 0x5529fe826, 0x29bc50b18, 0x194cfa5b9,
    0x88c79d063, 0x96c706357, 0x4d80973d5, 0x765a1286a,
    0x69f836da5, 0x54374fa25, 0x797f55d7a, 0xa373494c0,
    0x91a461cf3, 0xab0b0a819, 0x196321f17, 0xd5ba64442,
    0x5a2e73090, 0xad7dd79c9, 0x3e8155f38, 0xb10b60872,
    0x5813b18fb, 0xc5df2df94, 0x70e12a253, 0xd8ccfcddc,
    0x876d63f92, 0x61451c57c, 0xc2ae676dc, 0x07f9c6bc4,
    0xa75d32abf, 0x335a703b8, 0x578782f8a, 0x0327e961b,
    0x1f289bf41, 0xae305a0fb, 0x661ae5255, 0x4a95aedd0,
    0x80b9e4189, 0x8cf458a53, 0x1bc859916, 0x4661e623c,
    0x998349fea, 0x3a88387d6, 0xcd5c110fe, 0xcd97ab8ae,
    0x8eb1e56ee, 0xd04c02751, 0x3c46e53b5, 0x7331a80e4,
    0x96f5f21b3, 0xd58d2061b, 0x0f2711534, 0x4af86a33b,
    0x4370264ef, 0x8877c9aca, 0x6b6e5b52c, 0x0264dae32,
    0x1e46b3409, 0x6a7573336, 0x96b0f2b7c, 0x14d691bc8,
    0x2bf4b1e87, 0x346b97f6e, 0xc4f5cf5ae, 0xc576779a8,
    0xe3c30975b, 0xb6212d0eb, 0x6c50c2b92, 0x05ad4c73c,
    0x4798cf748, 0x32df91e33, 0x9516b0590, 0x226825f73,
    0xe614aac99, 0xac760c464, 0x27acc8c26, 0xa9c415c2d,
    0xc3bd5c5c2, 0xcb4971eff, 0x7cecfe134, 0xe0f76ccfc,
    0xabbf6c09e, 0x7490b301a, 0xf386e6ced, 0x7e9984026,
    0x3a0bdbf17, 0x189d3cd3a, 0xc1c9a8add, 0xb861109d7,
    0x891425fab, 0xd61c3d178, 0x8b068da79, 0x94bf71336,
    0x6582cc7ad, 0xa6f1ab27f, 0x4ec8095fd, 0x1f505f5f1,
    0xb3be72a2b, 0xa1ce1224a, 0x09c7771c2, 0xa44467e40,
    0x84222a609, 0xfc951dd7d, 0x6fc532dc1, 0x5f537069b,
    0x30070665a, 0x7c6044a7d, 0x629118a85, 0x76716f7de,
    0x307a3249f, 0x3698b54ff, 0x30dc80ba5, 0x708fc5cc2,
    0x7821a9e6a, 0x3df0772a0, 0x64c0871ea, 0xd463ae5b5,
    0x5ee4e51ef, 0x7aa1163fa, 0xcf10d0ea6, 0xa9d7b6f57,
    0xc0a5f795e, 0x6cb1e043d, 0xb20d42bfd, 0xe24fec258,
    0x3feaeab22, 0x957c1ddb0, 0x74784b222, 0x74f70233c,
    0xc89a97228, 0x20319f367, 0x55c18a765, 0xdf22ea73f,
    0xa26bd73ba, 0xb63f29682, 0xce70b35fa, 0x953d1608c,
    0x9ab102ba5, 0xa61ef981c, 0xb3bfa4361, 0x27cf2a465,
    0x1051b76dd, 0xfe8c016eb, 0x24d94daee, 0x571295a81,
    0x6067dc83b, 0x3f7250156, 0x914f04199, 0x948bd7145,
    0x5630f9fcb, 0xd88b3b36f, 0xc1c6c53cb, 0xcb601c59f,
    0x553add735, 0x8f6c5538e, 0xa4c2e8f6c, 0x6d2b27b09,
    0x1a645cba7, 0x8d7c5f417, 0xe4bd54920, 0x6f62de9ff,
    0x6aeb69992, 0x39dacd611, 0xded1caed9, 0xf6aaded67,
    0x6aee54201, 0x962d25d0d, 0x51e9c1796, 0x50a2fc9f5,
    0x600c464ec, 0x62498cc89, 0x1847179ed, 0x6e083ec05,
    0x4a11d3609, 0x7cb4f5f46, 0x55b70687b, 0xf959a75e8,
    0x9cb2966e1, 0xca338f1e1, 0x9743615f4, 0x324c7e302,
    0x2b0fc1d7d, 0x7030ee10c, 0x02dea92fe, 0x0f3a992d4,
    0xa3186dc49, 0xc4ca55f3e, 0x861438ac0, 0xa164f0773,
    0x8298d8062, 0x41f0d926e, 0xbf6086e56, 0xd47595c73,
    0x4d2174759, 0x3908fef4e, 0xd357edfa2, 0xbb422cee4,
    0xab792fa2d, 0x7ed328df3, 0x334b0f1e2, 0xf76fa9899,
    0x39264b39a, 0x1f879e866, 0x067cae1e1, 0x1ba6c3705,
    0x5843ece25, 0x0d05f9884, 0x846d0f3db, 0x75d31da9a,
    0x1678e5526, 0xfd3011f10, 0xe35e25693, 0x11b8ced55,
    0x1f41889c8, 0x23aabfbdd, 0x618a2dde6, 0xa0bdb06a3,
    0x4bfb86597, 0xe35ec3dab, 0xb25ecc9cd, 0x85b25ca8c,
    0x4b27eaf20, 0x449e48f71, 0x3fc2525ad, 0x18a9911a7,
    0xa5ef6128f, 0x7b5703cb6, 0x1d0446169, 0x2ac545191,
    0xa80ff25cc, 0x1939895f9, 0x1b8fdfda1, 0x8722f5082,
    0x2fdf1522f, 0x49de87899, 0x323c39c24, 0x2814344c1,
    0xf855d0358, 0xb97d9a6c1, 0x5ecd5d8f7, 0x6ce42c9a3,
    0x8f84bf9c3, 0xfb6bcb68e, 0x7a8f76a52, 0x60773192d,
    0x8c5284bc5, 0x5907bb11c, 0x20520ed8c, 0xe803ea2ff,
    0x9a756629d, 0x0b7ceabcf, 0x4fcd14918, 0x617e9e920,
    0x79df52029, 0xbdfab86b9, 0x2c9d5338d, 0xb253fd51f,
    0x84ff29541, 0x467827092, 0xf71fd1cb0, 0x5d802afb0,
    0x646d54296, 0x781872fe9, 0xc381f57c4, 0x1b6676cf5,
    0x022e7c959, 0x9576a8223, 0xf412e4cfa, 0x16ac1736b,
    0x69400db05, 0x987e5d5cb, 0x13562a70f, 0x463bea4fb,
    0xe1a52999c, 0x1fd938423, 0xd46a858af, 0x484ab06ce,
    0x4f5d7b205, 0x36d6375aa, 0xfd33221bb, 0xce064282d,
    0x685343657, 0x26e52d034, 0x89aeb5df5, 0x6e4764fef,
    0x0549c1fcb, 0xe54254dd3, 0x7b5e0e47b, 0x24dbc2de2,
    0x4f99e10f7, 0x9c8336d8b, 0x407ac6a5a, 0x081fcb922,
    0x75ef77400, 0x599cb4bc0, 0x02aa3023a, 0x84ae134d7,
    0x90c7a4ef2, 0x01f3294f7, 0x8b5d589dc, 0x7c2294105,
    0x9b16f12de, 0x75a3d0b5a, 0x194a54f09, 0x7792df0ee,
    0x6ae2b54b1, 0xc9ae6712f, 0x6dd6e4af0, 0x82d4201eb,
    0x24375ae99, 0x5d508d6ff, 0xa3c7c86bc, 0x6ffd924ac,
    0xf9d27e54f, 0xb8aa2f91a, 0xfa7cd2c11, 0x50b248cce,
    0xc6d016448, 0xbc02ad728, 0xaa3ac9105, 0xc55fdc306,
    0xf34641161, 0x2e43bacbc, 0xc75a69a8a, 0x562f4d5b2,
    0xf72ef4fda, 0x69bfa0934, 0xb80e73321, 0x5c08ae258,
    0xeefe67118, 0xb9a4567d5, 0x019e606cd, 0x1099c77bb,
    0xd0be764a5, 0x711632aa0, 0x47ee97d06, 0xae689c363,
    0x35aab0c57, 0xa201dc975, 0x12e70bff5, 0x5f4e259d5,
    0x9fe7dc98b, 0xf80b9c670, 0xf2997960c, 0xf881f0581,
    0x151b6cddb, 0x2a922b418, 0x93c5de240, 0xb2939cfc0,
    0x487b6c1d5, 0x8dfe4aefc, 0x514a09a3b, 0xa67c5edaf,
    0x015e035f4, 0xe749177f6, 0xf0843e62b, 0xd878b5ee5,
    0x1e384f397, 0x5136af2cb, 0xb32d75ebc, 0xca9d10754,
    0xde16c9073, 0xb245855fe, 0x31b039b33, 0x7ece53b3b,
    0xd43068a1f, 0xf57c7a09a, 0x8be8a077e, 0x7d32f51d8,
    0x849dfebd7, 0x3f580454d, 0xe1ad662f7, 0x90256c7d8,
    0xd2663527b, 0xb2a458d4b, 0xb84ea8347, 0xa43c8153b,
    0xb4a697d50, 0xca5e8c6a0, 0xbec5aebe0,
];

#[rustfmt::skip]
pub(crate) const TAG16H5: [u64; 30] = [
    0x00000e960, 0x0000091ce, 0x000001d29, 0x00000707c,
    0x000002d9e, 0x00000bd7b, 0x00000e721, 0x00000b3d1,
    0x00000d773, 0x0000034e9, 0x000000d62, 0x000000f7c,
    0x000003086, 0x00000f898, 0x000005a0b, 0x00000f302,
    0x0000060aa, 0x00000e68c, 0x000003b40, 0x0000098f4,
    0x000006bd8, 0x00000f4d4, 0x00000be13, 0x0000054e2,
    0x0000063b7, 0x00000a5fc, 0x000007be3, 0x000007618,
    0x00000b825, 0x00000bbaa,
];
